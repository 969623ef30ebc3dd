use crate::analysis::aggregate::{option_leg_pnl, stock_leg_pnl};
use crate::analysis::{StockLegMode, CONTRACT_MULTIPLIER};
use crate::models::PricingModel;
use crate::types::{MarketParameters, PayoffCurve, Position};

/// Lower edge of the sampled window as a fraction of the current price.
pub const GRID_LOW: f64 = 0.5;
/// Width of the sampled window as a fraction of the current price.
pub const GRID_SPAN: f64 = 1.0;

/// `points` evenly spaced prices from 0.5x the current price upward in steps
/// of S0 / points, so the last sample sits one step below 1.5x.
pub fn price_grid(spot: f64, points: usize) -> Vec<f64> {
    let n = points.max(2);
    (0..n)
        .map(|i| GRID_LOW * spot + i as f64 * GRID_SPAN * spot / n as f64)
        .collect()
}

/// Position payoff if the underlying settles at `s_t` at expiration.
#[inline]
pub fn expiration_payoff_at(position: &Position, s_t: f64, stock_legs: StockLegMode) -> f64 {
    let options: f64 = position
        .option_legs
        .iter()
        .map(|leg| {
            let intrinsic = leg.kind.intrinsic(s_t, leg.strike_price);
            leg.direction.sign() * (intrinsic - leg.entry_premium) * CONTRACT_MULTIPLIER
        })
        .sum();

    options + stock_payoff_at(position, s_t, stock_legs)
}

/// Position P&L if the underlying jumped to `s_t` now, with time and
/// volatility unchanged.
#[inline]
pub fn current_payoff_at(
    model: &dyn PricingModel,
    position: &Position,
    market: &MarketParameters,
    s_t: f64,
    stock_legs: StockLegMode,
) -> f64 {
    let options: f64 = position
        .option_legs
        .iter()
        .map(|leg| option_leg_pnl(model, s_t, leg, market))
        .sum();

    options + stock_payoff_at(position, s_t, stock_legs)
}

#[inline]
fn stock_payoff_at(position: &Position, s_t: f64, stock_legs: StockLegMode) -> f64 {
    match stock_legs {
        StockLegMode::Excluded => 0.0,
        StockLegMode::Included => position
            .stock_legs
            .iter()
            .map(|leg| stock_leg_pnl(s_t, leg))
            .sum(),
    }
}

/// Sample both payoff curves over the price grid around `spot`.
pub fn sample_payoff_curve(
    model: &dyn PricingModel,
    spot: f64,
    position: &Position,
    market: &MarketParameters,
    stock_legs: StockLegMode,
    points: usize,
) -> PayoffCurve {
    let grid = price_grid(spot, points);

    let expiration_payoff = grid
        .iter()
        .map(|&s_t| expiration_payoff_at(position, s_t, stock_legs))
        .collect();

    let current_payoff = grid
        .iter()
        .map(|&s_t| current_payoff_at(model, position, market, s_t, stock_legs))
        .collect();

    PayoffCurve {
        underlying_price_grid: grid,
        expiration_payoff,
        current_payoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::aggregate_position;
    use crate::models::black_scholes::BlackScholes;
    use crate::types::{Direction, InstrumentKind};

    #[test]
    fn test_grid_shape() {
        let grid = price_grid(100.0, 300);
        assert_eq!(grid.len(), 300);
        assert_eq!(grid[0], 50.0);
        assert!((grid[1] - grid[0] - 100.0 / 300.0).abs() < 1e-12);
        assert!((grid[299] - (150.0 - 100.0 / 300.0)).abs() < 1e-9, "last={}", grid[299]);
        assert!(grid.windows(2).all(|w| w[0] < w[1]), "grid must be ascending");
    }

    #[test]
    fn test_grid_never_degenerates() {
        assert_eq!(price_grid(80.0, 0).len(), 2);
        assert_eq!(price_grid(80.0, 1).len(), 2);
    }

    #[test]
    fn test_curves_have_equal_length() {
        let bs = BlackScholes::default();
        let position = Position::new().with_option(InstrumentKind::Put, Direction::Long, 100.0, 3.0);
        let curve = sample_payoff_curve(&bs, 100.0, &position, &MarketParameters::default(), StockLegMode::Excluded, 300);
        assert_eq!(curve.underlying_price_grid.len(), 300);
        assert_eq!(curve.expiration_payoff.len(), 300);
        assert_eq!(curve.current_payoff.len(), 300);
    }

    #[test]
    fn test_expiration_payoff_long_put() {
        let position = Position::new().with_option(InstrumentKind::Put, Direction::Long, 100.0, 3.0);
        assert_eq!(expiration_payoff_at(&position, 80.0, StockLegMode::Excluded), 1700.0);
        assert_eq!(expiration_payoff_at(&position, 120.0, StockLegMode::Excluded), -300.0);
    }

    #[test]
    fn test_current_curve_matches_aggregator_at_each_price() {
        let bs = BlackScholes::default();
        let m = MarketParameters::default();
        let position = Position::new()
            .with_option(InstrumentKind::Call, Direction::Short, 105.0, 3.0)
            .with_stock(Direction::Long, 100.0, 100);

        for mode in [StockLegMode::Excluded, StockLegMode::Included] {
            for &s_t in &[70.0, 100.0, 133.0] {
                let curve_value = current_payoff_at(&bs, &position, &m, s_t, mode);
                let snapshot = aggregate_position(&bs, s_t, &position, &m, mode);
                assert!((curve_value - snapshot.current_profit_loss).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_stock_legs_in_expiration_payoff() {
        let position = Position::new().with_stock(Direction::Short, 100.0, 100);
        assert_eq!(expiration_payoff_at(&position, 90.0, StockLegMode::Excluded), 0.0);
        assert_eq!(expiration_payoff_at(&position, 90.0, StockLegMode::Included), 1000.0);
    }

    #[test]
    fn test_expired_market_current_equals_expiration() {
        let bs = BlackScholes::default();
        let m = MarketParameters {
            days_to_expiration: 0,
            ..MarketParameters::default()
        };
        let position = Position::new()
            .with_option(InstrumentKind::Call, Direction::Long, 95.0, 5.0)
            .with_option(InstrumentKind::Put, Direction::Short, 90.0, 1.0);
        let curve = sample_payoff_curve(&bs, 100.0, &position, &m, StockLegMode::Excluded, 50);
        for (a, b) in curve.expiration_payoff.iter().zip(&curve.current_payoff) {
            assert!((a - b).abs() < 1e-9, "expired: exp={a} current={b}");
        }
    }
}
