//! Advisory quotes. Read-only; never moves funds.

use amm_model::{apply_with, price_impact_bps, quote_amount_in, AmmError, Reserves};

use crate::error::Result;
use crate::ledger::Ledger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub pool: String,
    /// Pool seqno the quote was computed against; pass it back to `swap` to
    /// refuse execution if the pool moved in between.
    pub seqno: u64,
    pub is_in_x: bool,
    pub amount_in: i128,
    pub amount_out: i128,
    pub fee: i128,
    /// Input token price in output units before the trade (1e6 scale).
    /// None when the price does not fit the fixed-point scale.
    pub spot_price: Option<i128>,
    pub price_impact_bps: Option<i128>,
    pub reserves: Reserves,
}

impl Ledger {
    pub fn quote(&self, pool: &str, is_in_x: bool, amount_in: i128) -> Result<Quote> {
        let state = self.pool_info(pool)?;
        let result = apply_with(&state.params, state.reserves, is_in_x, amount_in)?;

        Ok(Quote {
            pool: pool.to_string(),
            seqno: state.header.seqno,
            is_in_x,
            amount_in,
            amount_out: result.amount_out,
            fee: result.fee,
            spot_price: display_only(state.spot_price(is_in_x))?,
            price_impact_bps: display_only(price_impact_bps(&state.params, state.reserves, is_in_x, amount_in))?,
            reserves: state.reserves,
        })
    }

    /// Smallest input that pays at least `amount_out`.
    pub fn quote_amount_in(&self, pool: &str, is_in_x: bool, amount_out: i128) -> Result<i128> {
        let state = self.pool_info(pool)?;
        Ok(quote_amount_in(&state.params, state.reserves, is_in_x, amount_out)?)
    }
}

/// Price fields never fail a quote whose amounts are valid.
fn display_only(price: std::result::Result<i128, AmmError>) -> Result<Option<i128>> {
    match price {
        Ok(value) => Ok(Some(value)),
        Err(AmmError::Overflow) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
