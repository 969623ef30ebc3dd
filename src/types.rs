use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ── Leg tags ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Call,
    Put,
}

impl InstrumentKind {
    /// Value if exercised immediately at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// +1 for long, -1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

// ── Market parameters ──

/// Rates and volatility are decimal fractions (0.05 = 5%), not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketParameters {
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub dividend_yield: f64,
    pub days_to_expiration: u32,
}

impl MarketParameters {
    /// Time to expiration in years (calendar days / 365).
    #[inline]
    pub fn time_to_expiration(&self) -> f64 {
        self.days_to_expiration as f64 / 365.0
    }
}

impl Default for MarketParameters {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            volatility: 0.25,
            dividend_yield: 0.0,
            days_to_expiration: 30,
        }
    }
}

// ── Legs ──

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    #[serde(rename = "option_type")]
    pub kind: InstrumentKind,
    #[serde(rename = "position")]
    pub direction: Direction,
    #[serde(rename = "strike")]
    pub strike_price: f64,
    /// Price paid (long) or received (short) per share at entry.
    #[serde(rename = "premium")]
    pub entry_premium: f64,
}

impl OptionLeg {
    pub fn new(kind: InstrumentKind, direction: Direction, strike_price: f64, entry_premium: f64) -> Self {
        Self {
            kind,
            direction,
            strike_price,
            entry_premium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockLeg {
    #[serde(rename = "position")]
    pub direction: Direction,
    #[serde(rename = "price")]
    pub entry_price: f64,
    #[serde(rename = "quantity", default = "default_share_quantity")]
    pub share_quantity: u32,
}

fn default_share_quantity() -> u32 {
    100
}

impl StockLeg {
    pub fn new(direction: Direction, entry_price: f64, share_quantity: u32) -> Self {
        Self {
            direction,
            entry_price,
            share_quantity,
        }
    }
}

/// Option and stock legs sharing one underlying. Legs are independent and
/// contribute additively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub option_legs: Vec<OptionLeg>,
    #[serde(default)]
    pub stock_legs: Vec<StockLeg>,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(
        mut self,
        kind: InstrumentKind,
        direction: Direction,
        strike_price: f64,
        entry_premium: f64,
    ) -> Self {
        self.option_legs
            .push(OptionLeg::new(kind, direction, strike_price, entry_premium));
        self
    }

    pub fn with_stock(mut self, direction: Direction, entry_price: f64, share_quantity: u32) -> Self {
        self.stock_legs
            .push(StockLeg::new(direction, entry_price, share_quantity));
        self
    }

    pub fn leg_count(&self) -> usize {
        self.option_legs.len() + self.stock_legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leg_count() == 0
    }
}

// ── Greeks ──

/// Position or per-share sensitivities. Theta is per calendar day, vega per
/// 1 vol point, rho per 1 rate point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Scale every Greek by a factor (signed contract multiplier, quantity).
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }
}

impl std::ops::Add for Greeks {
    type Output = Greeks;

    fn add(self, other: Greeks) -> Greeks {
        Greeks {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }
}

impl std::ops::AddAssign for Greeks {
    fn add_assign(&mut self, other: Greeks) {
        *self = *self + other;
    }
}

// ── Analysis request / result (wire contract shared by both call sites) ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub strategy_name: String,
    #[serde(rename = "stock_price")]
    pub underlying_price: f64,
    #[serde(flatten)]
    pub position: Position,
    #[serde(rename = "market_params", default)]
    pub market: MarketParameters,
}

impl AnalysisRequest {
    pub fn new(
        strategy_name: impl Into<String>,
        underlying_price: f64,
        position: Position,
        market: MarketParameters,
    ) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            underlying_price,
            position,
            market,
        }
    }
}

/// Curves sampled over one ascending price grid. All three vectors have the
/// same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoffCurve {
    #[serde(rename = "stock_prices")]
    pub underlying_price_grid: Vec<f64>,
    #[serde(rename = "payoff_expiration")]
    pub expiration_payoff: Vec<f64>,
    #[serde(rename = "payoff_current")]
    pub current_payoff: Vec<f64>,
}

impl PayoffCurve {
    pub fn len(&self) -> usize {
        self.underlying_price_grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.underlying_price_grid.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "current_pnl")]
    pub current_profit_loss: f64,
    pub max_profit: f64,
    pub max_loss: f64,
    #[serde(rename = "break_evens")]
    pub break_even_prices: SmallVec<[f64; 4]>,
    #[serde(rename = "greeks")]
    pub aggregate_greeks: Greeks,
    /// Absent unless max_loss < 0 and max_profit > 0.
    pub risk_reward_ratio: Option<f64>,
    #[serde(rename = "payoff_data")]
    pub payoff_curve: PayoffCurve,
}

impl AnalysisResult {
    /// Largest absolute difference across every numeric output, or `None`
    /// when the two results do not have the same shape (curve length,
    /// break-even count, ratio presence).
    pub fn max_abs_diff(&self, other: &AnalysisResult) -> Option<f64> {
        if self.payoff_curve.len() != other.payoff_curve.len()
            || self.break_even_prices.len() != other.break_even_prices.len()
            || self.risk_reward_ratio.is_some() != other.risk_reward_ratio.is_some()
        {
            return None;
        }

        let a = &self.aggregate_greeks;
        let b = &other.aggregate_greeks;
        let scalars = [
            (self.current_profit_loss, other.current_profit_loss),
            (self.max_profit, other.max_profit),
            (self.max_loss, other.max_loss),
            (a.delta, b.delta),
            (a.gamma, b.gamma),
            (a.theta, b.theta),
            (a.vega, b.vega),
            (a.rho, b.rho),
            (
                self.risk_reward_ratio.unwrap_or(0.0),
                other.risk_reward_ratio.unwrap_or(0.0),
            ),
        ];

        let curves = [
            (&self.payoff_curve.underlying_price_grid, &other.payoff_curve.underlying_price_grid),
            (&self.payoff_curve.expiration_payoff, &other.payoff_curve.expiration_payoff),
            (&self.payoff_curve.current_payoff, &other.payoff_curve.current_payoff),
        ];

        let diff = scalars
            .iter()
            .copied()
            .chain(
                self.break_even_prices
                    .iter()
                    .copied()
                    .zip(other.break_even_prices.iter().copied()),
            )
            .chain(
                curves
                    .iter()
                    .flat_map(|(x, y)| x.iter().copied().zip(y.iter().copied())),
            )
            .map(|(x, y)| (x - y).abs())
            .fold(0.0_f64, f64::max);

        Some(diff)
    }
}
