pub mod black_scholes;
pub mod normal;

use crate::types::{Greeks, InstrumentKind, MarketParameters};

/// All option pricers implement this trait.
/// value() must be a pure function: deterministic output from inputs only.
/// Send + Sync required so one pricer can be shared across service tasks.
pub trait PricingModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Theoretical per-share price and Greeks for one option. Never panics;
    /// degenerate inputs produce boundary values instead of NaN.
    fn value(&self, inputs: &PricingInputs, kind: InstrumentKind) -> OptionValuation;
}

/// Inputs for a single pricer invocation. Built fresh per call, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PricingInputs {
    pub spot: f64,
    pub strike: f64,
    pub ttl_years: f64,
    pub rate: f64,
    pub sigma: f64,
    pub dividend_yield: f64,
}

impl PricingInputs {
    #[inline]
    pub fn new(spot: f64, strike: f64, market: &MarketParameters) -> Self {
        Self {
            spot,
            strike,
            ttl_years: market.time_to_expiration(),
            rate: market.risk_free_rate,
            sigma: market.volatility,
            dividend_yield: market.dividend_yield,
        }
    }

    /// Expired or zero-vol inputs take the boundary branch.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.ttl_years <= 0.0 || self.sigma <= 0.0
    }
}

/// Per-share pricer output.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct OptionValuation {
    pub price: f64,
    pub greeks: Greeks,
    /// Both 0 on the degenerate branch.
    pub d1: f64,
    pub d2: f64,
}
