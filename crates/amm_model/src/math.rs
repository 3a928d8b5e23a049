//! Constant product AMM math (x·y=k)
//!
//! Swap X→Y with input `Δx`:
//! - Δx_net = Δx - fee(Δx)
//! - x_eff = x0 + Δx_net
//! - y1 = k / x_eff (rounded per [`Rounding`])
//! - Δy_out = y0 - y1
//! - committed reserves: (x0 + Δx, y1), the fee stays in the pool
//!
//! Y→X is the exact mirror with the roles of the reserves swapped.

use crate::{AmmError, BPS_SCALE};

/// Pool reserve pair, in smallest token units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reserves {
    /// Token X held by the pool
    pub x: i128,
    /// Token Y held by the pool
    pub y: i128,
}

impl Reserves {
    pub const fn new(x: i128, y: i128) -> Self {
        Self { x, y }
    }

    /// Both reserves positive, i.e. the pool can quote.
    pub const fn is_active(&self) -> bool {
        self.x > 0 && self.y > 0
    }

    pub fn validate(&self) -> Result<(), AmmError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AmmError::InvalidReserves)
        }
    }

    /// The invariant k = x·y. Derived on demand, never stored.
    pub fn k(&self) -> Result<i128, AmmError> {
        self.x.checked_mul(self.y).ok_or(AmmError::Overflow)
    }

    /// Same pool seen from the other side (x and y exchanged).
    pub const fn flipped(&self) -> Self {
        Self { x: self.y, y: self.x }
    }

    /// (reserve_in, reserve_out) for a trade direction.
    pub const fn oriented(&self, is_in_x: bool) -> (i128, i128) {
        if is_in_x {
            (self.x, self.y)
        } else {
            (self.y, self.x)
        }
    }

    /// Inverse of [`Reserves::oriented`].
    pub const fn from_oriented(is_in_x: bool, reserve_in: i128, reserve_out: i128) -> Self {
        if is_in_x {
            Self::new(reserve_in, reserve_out)
        } else {
            Self::new(reserve_out, reserve_in)
        }
    }
}

/// Rounding applied to the post-trade output reserve `k / x_eff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rounding {
    /// Truncate, as the pool contract does. k may lose less than one unit of
    /// the input reserve per trade.
    #[default]
    Floor,
    /// Round up. k never decreases; the trader gets at most one unit less.
    Ceil,
}

/// Curve parameters for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapParams {
    /// Fee charged on the input, in basis points
    pub fee_bps: i128,
    pub rounding: Rounding,
}

impl SwapParams {
    /// Zero fee, truncating division: the deployed pool contract's behaviour.
    pub const CONTRACT: Self = Self {
        fee_bps: 0,
        rounding: Rounding::Floor,
    };

    pub const fn new(fee_bps: i128, rounding: Rounding) -> Self {
        Self { fee_bps, rounding }
    }

    pub fn validate(&self) -> Result<(), AmmError> {
        if self.fee_bps < 0 || self.fee_bps >= BPS_SCALE {
            return Err(AmmError::InvalidFee);
        }
        Ok(())
    }
}

impl Default for SwapParams {
    fn default() -> Self {
        Self::CONTRACT
    }
}

/// Outcome of a swap computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapResult {
    /// Amount of the opposite token paid to the trader
    pub amount_out: i128,
    /// Part of the input retained as fee (already inside `new_reserves`)
    pub fee: i128,
    /// Reserves after the trade
    pub new_reserves: Reserves,
}

/// Quote the output of a trade under the contract parameters.
///
/// Pure: identical inputs always give identical outputs. `amount_in == 0`
/// quotes 0.
pub fn quote(reserves: Reserves, is_in_x: bool, amount_in: i128) -> Result<i128, AmmError> {
    quote_with(&SwapParams::CONTRACT, reserves, is_in_x, amount_in)
}

/// Apply a trade under the contract parameters, returning the output and the
/// complete new reserve pair.
pub fn apply(reserves: Reserves, is_in_x: bool, amount_in: i128) -> Result<SwapResult, AmmError> {
    apply_with(&SwapParams::CONTRACT, reserves, is_in_x, amount_in)
}

pub fn quote_with(
    params: &SwapParams,
    reserves: Reserves,
    is_in_x: bool,
    amount_in: i128,
) -> Result<i128, AmmError> {
    apply_with(params, reserves, is_in_x, amount_in).map(|r| r.amount_out)
}

/// Compute a trade with explicit curve parameters.
///
/// Nothing is mutated here: the caller commits `new_reserves` as one value.
///
/// # Errors
/// * `InvalidReserves` - a reserve is zero or negative
/// * `InvalidAmount` - `amount_in < 0`, or the fee consumes the whole input
/// * `InvalidFee` - fee outside 0..10_000 bps
/// * `InsufficientLiquidity` - output would reach the opposite reserve
/// * `Overflow` - k or the new input reserve does not fit in `i128`
pub fn apply_with(
    params: &SwapParams,
    reserves: Reserves,
    is_in_x: bool,
    amount_in: i128,
) -> Result<SwapResult, AmmError> {
    reserves.validate()?;
    if amount_in < 0 {
        return Err(AmmError::InvalidAmount);
    }
    params.validate()?;

    if amount_in == 0 {
        return Ok(SwapResult {
            amount_out: 0,
            fee: 0,
            new_reserves: reserves,
        });
    }

    let (reserve_in, reserve_out) = reserves.oriented(is_in_x);
    let k = reserves.k()?;

    let fee = fee_on_input(amount_in, params.fee_bps)?;
    let net_in = amount_in - fee;
    if net_in <= 0 {
        return Err(AmmError::InvalidAmount);
    }

    let effective_in = reserve_in.checked_add(net_in).ok_or(AmmError::Overflow)?;
    let target_out = match params.rounding {
        Rounding::Floor => k / effective_in,
        Rounding::Ceil => div_ceil(k, effective_in),
    };

    // target_out <= k / reserve_in == reserve_out, so this cannot go negative
    // for valid reserves.
    let amount_out = reserve_out - target_out;
    if amount_out < 0 || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }

    let new_in = reserve_in.checked_add(amount_in).ok_or(AmmError::Overflow)?;
    let new_out = reserve_out - amount_out;

    Ok(SwapResult {
        amount_out,
        fee,
        new_reserves: Reserves::from_oriented(is_in_x, new_in, new_out),
    })
}

/// Check the post-trade invariant for a computed swap.
///
/// `Ceil` must keep k_after >= k_before. `Floor` truncates `k / x_eff`,
/// which loses strictly less than `x_eff <= new_reserve_in`, so
/// k_after + new_reserve_in > k_before must hold.
pub fn invariant_preserved(
    params: &SwapParams,
    before: &Reserves,
    is_in_x: bool,
    result: &SwapResult,
) -> Result<bool, AmmError> {
    let k_before = before.k()?;
    let k_after = result.new_reserves.k()?;

    if result.amount_out == 0 && result.new_reserves == *before {
        return Ok(true);
    }

    Ok(match params.rounding {
        Rounding::Ceil => k_after >= k_before,
        Rounding::Floor => {
            let (new_in, _) = result.new_reserves.oriented(is_in_x);
            let slack = k_after.checked_add(new_in).ok_or(AmmError::Overflow)?;
            slack > k_before
        }
    })
}

/// Fee on input, rounded up in favour of the pool.
fn fee_on_input(amount_in: i128, fee_bps: i128) -> Result<i128, AmmError> {
    if fee_bps == 0 {
        return Ok(0);
    }
    let n = amount_in.checked_mul(fee_bps).ok_or(AmmError::Overflow)?;
    Ok(div_ceil(n, BPS_SCALE))
}

/// Ceiling division for non-negative numerator and positive denominator.
#[inline]
fn div_ceil(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 {
        q + 1
    } else {
        q
    }
}
