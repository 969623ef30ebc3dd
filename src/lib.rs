//! Options position analytics: Black-Scholes-Merton pricing and Greeks,
//! position aggregation, payoff curves, break-evens and risk summary.
//!
//! The same `analysis::Engine` backs the in-process API and the HTTP/WS
//! analysis service (`server`), so both call sites produce identical numbers.
//! `remote::RemoteEngine` talks to a running service.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod remote;
pub mod risk;
pub mod server;
pub mod state;
pub mod strategies;
pub mod types;

pub use analysis::{Engine, EngineSettings, StockLegMode};
pub use errors::{EngineError, EngineResult};
pub use models::normal::CdfMode;
pub use types::{
    AnalysisRequest, AnalysisResult, Direction, Greeks, InstrumentKind, MarketParameters, OptionLeg,
    PayoffCurve, Position, StockLeg,
};
