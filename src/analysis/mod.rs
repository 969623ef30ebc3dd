pub mod aggregate;
pub mod payoff;

use crate::errors::{EngineError, EngineResult};
use crate::models::black_scholes::BlackScholes;
use crate::models::normal::CdfMode;
use crate::risk::{breakeven, summary};
use crate::types::{AnalysisRequest, AnalysisResult, MarketParameters, Position};

/// One option contract covers this many shares.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Payoff curve sample count.
pub const DEFAULT_GRID_POINTS: usize = 300;

/// Whether stock legs take part in P&L, payoff curves and delta.
///
/// `Excluded` is the default: only option legs are
/// valued. `Included` values shares at mark-to-market and gives them a delta
/// of +/- quantity (zero for the other Greeks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLegMode {
    #[default]
    Excluded,
    Included,
}

impl std::fmt::Display for StockLegMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excluded => write!(f, "excluded"),
            Self::Included => write!(f, "included"),
        }
    }
}

impl std::str::FromStr for StockLegMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excluded" | "exclude" => Ok(Self::Excluded),
            "included" | "include" => Ok(Self::Included),
            other => Err(format!("unknown stock leg mode `{other}` (expected excluded|included)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct EngineSettings {
    pub cdf_mode: CdfMode,
    pub stock_legs: StockLegMode,
    pub grid_points: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cdf_mode: CdfMode::Approximate,
            stock_legs: StockLegMode::Excluded,
            grid_points: DEFAULT_GRID_POINTS,
        }
    }
}

/// The analytics engine. Both the in-process path and the analysis service
/// call `analyze`; there is no other implementation of the formulas.
///
/// Holds no mutable state: a shared `&Engine` can serve concurrent callers.
pub struct Engine {
    model: BlackScholes,
    settings: EngineSettings,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            model: BlackScholes::new(settings.cdf_mode),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn model(&self) -> &BlackScholes {
        &self.model
    }

    /// Full analysis of a position at the current underlying price.
    ///
    /// Validates the inputs, then: aggregate current P&L and Greeks, sample
    /// the payoff curves, solve break-evens and summarize risk from the
    /// expiration curve.
    pub fn analyze(
        &self,
        underlying_price: f64,
        position: &Position,
        market: &MarketParameters,
    ) -> EngineResult<AnalysisResult> {
        if let Err(e) = validate_inputs(underlying_price, position, market) {
            tracing::warn!(error = %e, "analysis input rejected");
            return Err(e);
        }

        let snapshot = aggregate::aggregate_position(
            &self.model,
            underlying_price,
            position,
            market,
            self.settings.stock_legs,
        );

        let curve = payoff::sample_payoff_curve(
            &self.model,
            underlying_price,
            position,
            market,
            self.settings.stock_legs,
            self.settings.grid_points,
        );

        let break_even_prices =
            breakeven::find_break_evens(&curve.underlying_price_grid, &curve.expiration_payoff);
        let risk = summary::summarize(&curve.expiration_payoff);

        tracing::debug!(
            option_legs = position.option_legs.len(),
            stock_legs = position.stock_legs.len(),
            grid_points = curve.len(),
            break_evens = break_even_prices.len(),
            "position analyzed"
        );

        Ok(AnalysisResult {
            current_profit_loss: snapshot.current_profit_loss,
            max_profit: risk.max_profit,
            max_loss: risk.max_loss,
            break_even_prices,
            aggregate_greeks: snapshot.greeks,
            risk_reward_ratio: risk.risk_reward_ratio,
            payoff_curve: curve,
        })
    }

    pub fn analyze_request(&self, request: &AnalysisRequest) -> EngineResult<AnalysisResult> {
        self.analyze(request.underlying_price, &request.position, &request.market)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

/// Boundary validation. The pricer accepts any real input; NaN or infinite
/// values would only surface later as garbage curves, so they stop here.
pub fn validate_inputs(
    underlying_price: f64,
    position: &Position,
    market: &MarketParameters,
) -> EngineResult<()> {
    positive("underlying_price", underlying_price)?;

    finite("market_params.risk_free_rate", market.risk_free_rate)?;
    finite("market_params.dividend_yield", market.dividend_yield)?;
    finite("market_params.volatility", market.volatility)?;
    if market.volatility < 0.0 {
        return Err(EngineError::invalid("market_params.volatility", "must not be negative"));
    }

    for (i, leg) in position.option_legs.iter().enumerate() {
        positive(&format!("option_legs[{i}].strike_price"), leg.strike_price)?;
        finite(&format!("option_legs[{i}].entry_premium"), leg.entry_premium)?;
    }

    for (i, leg) in position.stock_legs.iter().enumerate() {
        finite(&format!("stock_legs[{i}].entry_price"), leg.entry_price)?;
        if leg.share_quantity == 0 {
            return Err(EngineError::invalid(
                format!("stock_legs[{i}].share_quantity"),
                "must be positive",
            ));
        }
    }

    Ok(())
}

fn finite(field: &str, value: f64) -> EngineResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &str, value: f64) -> EngineResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(field, format!("must be positive, got {value}")))
    }
}
