//! AMM Model - Pure constant product math (x·y=k)
//!
//! This crate is the single home of the swap formula. The pool ledger applies
//! trades through it and the CLI quotes through it, so the advisory quote and
//! the authoritative swap can never drift apart.
//!
//! All amounts are `i128` in the smallest token unit, mirroring the 128-bit
//! signed amounts of the on-chain pool contract.

#![no_std]
#![forbid(unsafe_code)]

use core::fmt;

pub mod math;
pub mod price;

pub use math::{
    apply, apply_with, invariant_preserved, quote, quote_with, Reserves, Rounding, SwapParams,
    SwapResult,
};
pub use price::{execution_price, price_impact_bps, quote_amount_in, spot_price};

/// Price scaling factor (1e6)
pub const PRICE_SCALE: i128 = 1_000_000;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: i128 = 10_000;

/// Error types for AMM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmmError {
    /// Invalid reserves (zero or negative)
    InvalidReserves,
    /// Invalid amount (negative, or fully consumed by the fee)
    InvalidAmount,
    /// Trade would drain the opposite reserve
    InsufficientLiquidity,
    /// Fee outside 0..10_000 bps
    InvalidFee,
    /// Arithmetic overflow
    Overflow,
}

impl AmmError {
    /// Stable machine-readable name, used in logs and CLI output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidReserves => "invalid_reserves",
            Self::InvalidAmount => "invalid_amount",
            Self::InsufficientLiquidity => "insufficient_liquidity",
            Self::InvalidFee => "invalid_fee",
            Self::Overflow => "overflow",
        }
    }
}

impl fmt::Display for AmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidReserves => "pool reserves must both be positive",
            Self::InvalidAmount => "amount must be non-negative and larger than the fee",
            Self::InsufficientLiquidity => "trade would drain the opposite reserve",
            Self::InvalidFee => "fee must be within 0..10000 bps",
            Self::Overflow => "arithmetic overflow in swap math",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for AmmError {}
