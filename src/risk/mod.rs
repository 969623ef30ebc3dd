pub mod breakeven;
pub mod summary;
