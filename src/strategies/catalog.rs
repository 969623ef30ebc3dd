//! Position builders for the named strategies.
//!
//! Every builder returns a plain `Position`; pricing and analysis are left to
//! the engine. Stock legs are one round lot (100 shares).

use crate::errors::{EngineError, EngineResult};
use crate::types::Direction::{Long, Short};
use crate::types::InstrumentKind::{Call, Put};
use crate::types::Position;

/// Shares per stock leg.
pub const ROUND_LOT: u32 = 100;

/// Default short-to-long ratio for ratio spreads.
pub const DEFAULT_RATIO: u32 = 2;

// ── Basic ──

/// Long stock + short call.
pub fn covered_call(stock_price: f64, call_strike: f64, call_premium: f64) -> Position {
    Position::new()
        .with_stock(Long, stock_price, ROUND_LOT)
        .with_option(Call, Short, call_strike, call_premium)
}

/// Short stock + short put.
pub fn covered_put(stock_price: f64, put_strike: f64, put_premium: f64) -> Position {
    Position::new()
        .with_stock(Short, stock_price, ROUND_LOT)
        .with_option(Put, Short, put_strike, put_premium)
}

/// Long stock + long put.
pub fn protective_put(stock_price: f64, put_strike: f64, put_premium: f64) -> Position {
    Position::new()
        .with_stock(Long, stock_price, ROUND_LOT)
        .with_option(Put, Long, put_strike, put_premium)
}

/// Short stock + long call.
pub fn protective_call(stock_price: f64, call_strike: f64, call_premium: f64) -> Position {
    Position::new()
        .with_stock(Short, stock_price, ROUND_LOT)
        .with_option(Call, Long, call_strike, call_premium)
}

// ── Vertical spreads ──

pub fn bull_call_spread(lower_strike: f64, upper_strike: f64, lower_premium: f64, upper_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, lower_strike, lower_premium)
        .with_option(Call, Short, upper_strike, upper_premium)
}

pub fn bear_put_spread(lower_strike: f64, upper_strike: f64, lower_premium: f64, upper_premium: f64) -> Position {
    Position::new()
        .with_option(Put, Long, upper_strike, upper_premium)
        .with_option(Put, Short, lower_strike, lower_premium)
}

pub fn bull_put_spread(lower_strike: f64, upper_strike: f64, lower_premium: f64, upper_premium: f64) -> Position {
    Position::new()
        .with_option(Put, Short, upper_strike, upper_premium)
        .with_option(Put, Long, lower_strike, lower_premium)
}

pub fn bear_call_spread(lower_strike: f64, upper_strike: f64, lower_premium: f64, upper_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, lower_strike, lower_premium)
        .with_option(Call, Long, upper_strike, upper_premium)
}

// ── Calendar & diagonal ──
//
// Both legs share the position's single expiry, so these are valued as if
// the near and far contracts expired together.

/// Sell near, buy far, same strike.
pub fn call_calendar_spread(strike: f64, near_premium: f64, far_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, strike, near_premium)
        .with_option(Call, Long, strike, far_premium)
}

pub fn put_calendar_spread(strike: f64, near_premium: f64, far_premium: f64) -> Position {
    Position::new()
        .with_option(Put, Short, strike, near_premium)
        .with_option(Put, Long, strike, far_premium)
}

pub fn diagonal_call_spread(near_strike: f64, far_strike: f64, near_premium: f64, far_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, near_strike, near_premium)
        .with_option(Call, Long, far_strike, far_premium)
}

pub fn diagonal_put_spread(near_strike: f64, far_strike: f64, near_premium: f64, far_premium: f64) -> Position {
    Position::new()
        .with_option(Put, Short, near_strike, near_premium)
        .with_option(Put, Long, far_strike, far_premium)
}

// ── Straddles, strangles, strips, straps ──

pub fn long_straddle(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, strike, call_premium)
        .with_option(Put, Long, strike, put_premium)
}

pub fn short_straddle(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, strike, call_premium)
        .with_option(Put, Short, strike, put_premium)
}

pub fn long_strangle(call_strike: f64, put_strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, call_strike, call_premium)
        .with_option(Put, Long, put_strike, put_premium)
}

pub fn short_strangle(call_strike: f64, put_strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, call_strike, call_premium)
        .with_option(Put, Short, put_strike, put_premium)
}

/// One call + two puts (bearish straddle).
pub fn long_strip(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, strike, call_premium)
        .with_option(Put, Long, strike, put_premium)
        .with_option(Put, Long, strike, put_premium)
}

pub fn short_strip(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, strike, call_premium)
        .with_option(Put, Short, strike, put_premium)
        .with_option(Put, Short, strike, put_premium)
}

/// Two calls + one put (bullish straddle).
pub fn long_strap(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, strike, call_premium)
        .with_option(Call, Long, strike, call_premium)
        .with_option(Put, Long, strike, put_premium)
}

pub fn short_strap(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, strike, call_premium)
        .with_option(Call, Short, strike, call_premium)
        .with_option(Put, Short, strike, put_premium)
}

// ── Butterflies ──

/// Strikes are (lower, middle, upper); the middle strike is sold twice.
pub fn long_call_butterfly(strikes: (f64, f64, f64), premiums: (f64, f64, f64)) -> Position {
    Position::new()
        .with_option(Call, Long, strikes.0, premiums.0)
        .with_option(Call, Short, strikes.1, premiums.1)
        .with_option(Call, Short, strikes.1, premiums.1)
        .with_option(Call, Long, strikes.2, premiums.2)
}

pub fn long_put_butterfly(strikes: (f64, f64, f64), premiums: (f64, f64, f64)) -> Position {
    Position::new()
        .with_option(Put, Long, strikes.0, premiums.0)
        .with_option(Put, Short, strikes.1, premiums.1)
        .with_option(Put, Short, strikes.1, premiums.1)
        .with_option(Put, Long, strikes.2, premiums.2)
}

pub fn short_call_butterfly(strikes: (f64, f64, f64), premiums: (f64, f64, f64)) -> Position {
    Position::new()
        .with_option(Call, Short, strikes.0, premiums.0)
        .with_option(Call, Long, strikes.1, premiums.1)
        .with_option(Call, Long, strikes.1, premiums.1)
        .with_option(Call, Short, strikes.2, premiums.2)
}

/// Short ATM straddle with long wings.
pub struct IronButterfly {
    pub atm_strike: f64,
    pub lower_strike: f64,
    pub upper_strike: f64,
    pub atm_call_premium: f64,
    pub atm_put_premium: f64,
    pub lower_put_premium: f64,
    pub upper_call_premium: f64,
}

pub fn iron_butterfly(p: &IronButterfly) -> Position {
    Position::new()
        .with_option(Call, Short, p.atm_strike, p.atm_call_premium)
        .with_option(Put, Short, p.atm_strike, p.atm_put_premium)
        .with_option(Put, Long, p.lower_strike, p.lower_put_premium)
        .with_option(Call, Long, p.upper_strike, p.upper_call_premium)
}

// ── Condors ──

/// Strikes and premiums are ordered lowest strike first.
pub fn iron_condor(strikes: [f64; 4], premiums: [f64; 4]) -> Position {
    Position::new()
        .with_option(Put, Long, strikes[0], premiums[0])
        .with_option(Put, Short, strikes[1], premiums[1])
        .with_option(Call, Short, strikes[2], premiums[2])
        .with_option(Call, Long, strikes[3], premiums[3])
}

pub fn long_call_condor(strikes: [f64; 4], premiums: [f64; 4]) -> Position {
    Position::new()
        .with_option(Call, Long, strikes[0], premiums[0])
        .with_option(Call, Short, strikes[1], premiums[1])
        .with_option(Call, Short, strikes[2], premiums[2])
        .with_option(Call, Long, strikes[3], premiums[3])
}

pub fn long_put_condor(strikes: [f64; 4], premiums: [f64; 4]) -> Position {
    Position::new()
        .with_option(Put, Long, strikes[0], premiums[0])
        .with_option(Put, Short, strikes[1], premiums[1])
        .with_option(Put, Short, strikes[2], premiums[2])
        .with_option(Put, Long, strikes[3], premiums[3])
}

// ── Ratio spreads ──

fn check_ratio(ratio: u32) -> EngineResult<()> {
    if ratio == 0 {
        return Err(EngineError::invalid("ratio", "must be at least 1"));
    }
    Ok(())
}

/// Long 1 lower call + short `ratio` upper calls.
pub fn call_ratio_spread(
    lower_strike: f64,
    upper_strike: f64,
    lower_premium: f64,
    upper_premium: f64,
    ratio: u32,
) -> EngineResult<Position> {
    check_ratio(ratio)?;
    let mut position = Position::new().with_option(Call, Long, lower_strike, lower_premium);
    for _ in 0..ratio {
        position = position.with_option(Call, Short, upper_strike, upper_premium);
    }
    Ok(position)
}

/// Long 1 upper put + short `ratio` lower puts.
pub fn put_ratio_spread(
    lower_strike: f64,
    upper_strike: f64,
    lower_premium: f64,
    upper_premium: f64,
    ratio: u32,
) -> EngineResult<Position> {
    check_ratio(ratio)?;
    let mut position = Position::new().with_option(Put, Long, upper_strike, upper_premium);
    for _ in 0..ratio {
        position = position.with_option(Put, Short, lower_strike, lower_premium);
    }
    Ok(position)
}

/// Short 1 lower call + long `ratio` upper calls.
pub fn call_ratio_backspread(
    lower_strike: f64,
    upper_strike: f64,
    lower_premium: f64,
    upper_premium: f64,
    ratio: u32,
) -> EngineResult<Position> {
    check_ratio(ratio)?;
    let mut position = Position::new().with_option(Call, Short, lower_strike, lower_premium);
    for _ in 0..ratio {
        position = position.with_option(Call, Long, upper_strike, upper_premium);
    }
    Ok(position)
}

// ── Collars ──

/// Long stock + long put + short call.
pub fn collar(stock_price: f64, put_strike: f64, call_strike: f64, put_premium: f64, call_premium: f64) -> Position {
    Position::new()
        .with_stock(Long, stock_price, ROUND_LOT)
        .with_option(Put, Long, put_strike, put_premium)
        .with_option(Call, Short, call_strike, call_premium)
}

/// Short stock + short put + long call.
pub fn reverse_collar(stock_price: f64, put_strike: f64, call_strike: f64, put_premium: f64, call_premium: f64) -> Position {
    Position::new()
        .with_stock(Short, stock_price, ROUND_LOT)
        .with_option(Put, Short, put_strike, put_premium)
        .with_option(Call, Long, call_strike, call_premium)
}

// ── Advanced ──

/// Short put + bear call spread.
pub fn jade_lizard(put_strike: f64, call_lower: f64, call_upper: f64, premiums: (f64, f64, f64)) -> Position {
    Position::new()
        .with_option(Put, Short, put_strike, premiums.0)
        .with_option(Call, Short, call_lower, premiums.1)
        .with_option(Call, Long, call_upper, premiums.2)
}

/// Long stock + long put + bear call spread.
pub fn seagull(
    stock_price: f64,
    put_strike: f64,
    call_lower: f64,
    call_upper: f64,
    premiums: (f64, f64, f64),
) -> Position {
    Position::new()
        .with_stock(Long, stock_price, ROUND_LOT)
        .with_option(Put, Long, put_strike, premiums.0)
        .with_option(Call, Short, call_lower, premiums.1)
        .with_option(Call, Long, call_upper, premiums.2)
}

/// Bull call spread + bear put spread on the same strikes.
pub struct BoxSpread {
    pub lower_strike: f64,
    pub upper_strike: f64,
    pub call_lower_premium: f64,
    pub call_upper_premium: f64,
    pub put_lower_premium: f64,
    pub put_upper_premium: f64,
}

pub fn box_spread(p: &BoxSpread) -> Position {
    Position::new()
        .with_option(Call, Long, p.lower_strike, p.call_lower_premium)
        .with_option(Call, Short, p.upper_strike, p.call_upper_premium)
        .with_option(Put, Long, p.upper_strike, p.put_upper_premium)
        .with_option(Put, Short, p.lower_strike, p.put_lower_premium)
}

/// Long stock + long put + short call, same strike.
pub fn conversion(stock_price: f64, strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_stock(Long, stock_price, ROUND_LOT)
        .with_option(Put, Long, strike, put_premium)
        .with_option(Call, Short, strike, call_premium)
}

/// Short stock + short put + long call, same strike.
pub fn reversal(stock_price: f64, strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_stock(Short, stock_price, ROUND_LOT)
        .with_option(Put, Short, strike, put_premium)
        .with_option(Call, Long, strike, call_premium)
}

/// Deep ITM call in place of stock + short OTM call.
pub fn poor_mans_covered_call(deep_itm_strike: f64, otm_strike: f64, deep_itm_premium: f64, otm_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, deep_itm_strike, deep_itm_premium)
        .with_option(Call, Short, otm_strike, otm_premium)
}

/// Cash-secured put.
pub fn wheel_put_phase(put_strike: f64, put_premium: f64) -> Position {
    Position::new().with_option(Put, Short, put_strike, put_premium)
}

/// Covered call written after assignment.
pub fn wheel_call_phase(stock_price: f64, call_strike: f64, call_premium: f64) -> Position {
    covered_call(stock_price, call_strike, call_premium)
}

/// Long 1 deep ITM call + short 2 OTM calls.
pub fn zebra_spread(deep_itm_strike: f64, otm_strike: f64, deep_itm_premium: f64, otm_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, deep_itm_strike, deep_itm_premium)
        .with_option(Call, Short, otm_strike, otm_premium)
        .with_option(Call, Short, otm_strike, otm_premium)
}

/// Long the lowest strike, short the middle and highest.
pub fn call_ladder(strikes: (f64, f64, f64), premiums: (f64, f64, f64)) -> Position {
    Position::new()
        .with_option(Call, Long, strikes.0, premiums.0)
        .with_option(Call, Short, strikes.1, premiums.1)
        .with_option(Call, Short, strikes.2, premiums.2)
}

/// Long the highest strike, short the middle and lowest.
pub fn put_ladder(strikes: (f64, f64, f64), premiums: (f64, f64, f64)) -> Position {
    Position::new()
        .with_option(Put, Long, strikes.2, premiums.2)
        .with_option(Put, Short, strikes.1, premiums.1)
        .with_option(Put, Short, strikes.0, premiums.0)
}

// ── Synthetics ──

/// Long call + short put.
pub fn synthetic_long_stock(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Long, strike, call_premium)
        .with_option(Put, Short, strike, put_premium)
}

/// Short call + long put.
pub fn synthetic_short_stock(strike: f64, call_premium: f64, put_premium: f64) -> Position {
    Position::new()
        .with_option(Call, Short, strike, call_premium)
        .with_option(Put, Long, strike, put_premium)
}
