pub mod client;

pub use client::RemoteEngine;
