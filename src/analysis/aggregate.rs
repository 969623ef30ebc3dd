use crate::analysis::{StockLegMode, CONTRACT_MULTIPLIER};
use crate::models::{PricingInputs, PricingModel};
use crate::types::{Greeks, MarketParameters, OptionLeg, Position, StockLeg};

/// Position-level current valuation at one underlying price.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionSnapshot {
    pub current_profit_loss: f64,
    pub greeks: Greeks,
}

/// Per-contract P&L of one option leg if the underlying were at `spot` now.
#[inline]
pub fn option_leg_pnl(
    model: &dyn PricingModel,
    spot: f64,
    leg: &OptionLeg,
    market: &MarketParameters,
) -> f64 {
    let inputs = PricingInputs::new(spot, leg.strike_price, market);
    let valuation = model.value(&inputs, leg.kind);
    leg.direction.sign() * (valuation.price - leg.entry_premium) * CONTRACT_MULTIPLIER
}

/// Mark-to-market P&L of a share position at `spot`.
#[inline]
pub fn stock_leg_pnl(spot: f64, leg: &StockLeg) -> f64 {
    leg.direction.sign() * (spot - leg.entry_price) * leg.share_quantity as f64
}

/// Sum the signed contributions of every leg at the current underlying price.
///
/// Option legs go through the pricer and contribute sign * value * 100 to
/// P&L and to each Greek. Stock legs are skipped entirely under
/// `StockLegMode::Excluded`; under `Included` they add their mark-to-market
/// P&L and a delta of +/- share quantity. Pure function.
pub fn aggregate_position(
    model: &dyn PricingModel,
    spot: f64,
    position: &Position,
    market: &MarketParameters,
    stock_legs: StockLegMode,
) -> PositionSnapshot {
    let mut snapshot = PositionSnapshot::default();

    for leg in &position.option_legs {
        let inputs = PricingInputs::new(spot, leg.strike_price, market);
        let valuation = model.value(&inputs, leg.kind);
        let signed = leg.direction.sign() * CONTRACT_MULTIPLIER;

        snapshot.current_profit_loss += signed * (valuation.price - leg.entry_premium);
        snapshot.greeks += valuation.greeks.scale(signed);
    }

    if stock_legs == StockLegMode::Included {
        for leg in &position.stock_legs {
            snapshot.current_profit_loss += stock_leg_pnl(spot, leg);
            snapshot.greeks.delta += leg.direction.sign() * leg.share_quantity as f64;
        }
    }

    snapshot
}
