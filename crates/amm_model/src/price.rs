//! Display-side pricing: spot price, execution price, price impact, and the
//! reverse quote (input needed for a desired output).
//!
//! Prices are output units per input unit, scaled by [`PRICE_SCALE`].

use crate::math::{apply_with, Reserves, SwapParams};
use crate::{AmmError, BPS_SCALE, PRICE_SCALE};

/// Marginal price of the input token before any trade.
pub fn spot_price(reserves: Reserves, is_in_x: bool) -> Result<i128, AmmError> {
    reserves.validate()?;
    let (reserve_in, reserve_out) = reserves.oriented(is_in_x);
    scale_div(reserve_out, reserve_in)
}

/// Average price actually paid by a trade.
pub fn execution_price(amount_in: i128, amount_out: i128) -> Result<i128, AmmError> {
    if amount_in <= 0 || amount_out < 0 {
        return Err(AmmError::InvalidAmount);
    }
    scale_div(amount_out, amount_in)
}

/// `floor(num * PRICE_SCALE / den)` for `num >= 0, den > 0`. Divides first when
/// the full product does not fit, so only an unrepresentable result overflows.
fn scale_div(num: i128, den: i128) -> Result<i128, AmmError> {
    if let Some(scaled) = num.checked_mul(PRICE_SCALE) {
        return Ok(scaled / den);
    }
    let whole = (num / den).checked_mul(PRICE_SCALE).ok_or(AmmError::Overflow)?;
    let frac = (num % den).checked_mul(PRICE_SCALE).ok_or(AmmError::Overflow)? / den;
    whole.checked_add(frac).ok_or(AmmError::Overflow)
}

/// Slippage of a trade relative to spot, in basis points.
///
/// Grows with trade size. Can be slightly negative for dust trades, where
/// truncation of the output reserve rounds in the trader's favour.
pub fn price_impact_bps(
    params: &SwapParams,
    reserves: Reserves,
    is_in_x: bool,
    amount_in: i128,
) -> Result<i128, AmmError> {
    let result = apply_with(params, reserves, is_in_x, amount_in)?;
    if amount_in == 0 {
        return Ok(0);
    }

    let spot = spot_price(reserves, is_in_x)?;
    if spot == 0 {
        return Ok(0);
    }
    let exec = execution_price(amount_in, result.amount_out)?;

    let diff = (spot - exec).checked_mul(BPS_SCALE).ok_or(AmmError::Overflow)?;
    Ok(diff / spot)
}

/// Smallest `amount_in` whose quote pays at least `amount_out`.
///
/// Starts from the closed-form estimate `ceil(r_in·Δout / (r_out - Δout))`
/// grossed up for the fee, widens it until it satisfies, then binary-searches
/// down so rounding can never make the answer one unit too large.
pub fn quote_amount_in(
    params: &SwapParams,
    reserves: Reserves,
    is_in_x: bool,
    amount_out: i128,
) -> Result<i128, AmmError> {
    reserves.validate()?;
    params.validate()?;
    if amount_out < 0 {
        return Err(AmmError::InvalidAmount);
    }
    if amount_out == 0 {
        return Ok(0);
    }

    let (reserve_in, reserve_out) = reserves.oriented(is_in_x);
    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }

    let pays_enough = |amount_in: i128| -> Result<bool, AmmError> {
        match apply_with(params, reserves, is_in_x, amount_in) {
            Ok(result) => Ok(result.amount_out >= amount_out),
            // The fee swallowed the whole input
            Err(AmmError::InvalidAmount) => Ok(false),
            // Past the drain point; smaller inputs are searched first
            Err(AmmError::InsufficientLiquidity) => Ok(true),
            Err(e) => Err(e),
        }
    };

    let num = reserve_in.checked_mul(amount_out).ok_or(AmmError::Overflow)?;
    let net_guess = ceil_div(num, reserve_out - amount_out);
    let gross_num = net_guess.checked_mul(BPS_SCALE).ok_or(AmmError::Overflow)?;
    let mut hi = ceil_div(gross_num, BPS_SCALE - params.fee_bps)
        .checked_add(1)
        .ok_or(AmmError::Overflow)?;

    while !pays_enough(hi)? {
        hi = hi.checked_mul(2).ok_or(AmmError::Overflow)?;
    }

    let mut lo: i128 = 1;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pays_enough(mid)? {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    // Confirm the minimum is an executable trade, not a drain.
    apply_with(params, reserves, is_in_x, hi)?;
    Ok(hi)
}

#[inline]
fn ceil_div(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 {
        q + 1
    } else {
        q
    }
}
