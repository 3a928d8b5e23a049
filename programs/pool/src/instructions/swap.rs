//! Swap instruction - the only path that moves pool reserves
//!
//! The trader must have approved the pool account for `amount_in` of the
//! input token beforehand; the pool pulls it with transfer_from semantics and
//! pays `amount_out` of the other token back.

use amm_model::{apply_with, invariant_preserved, Reserves};
use log::{info, warn};

use crate::error::{PoolError, Result};
use crate::ledger::{ensure_user_signer, validate_amount, Ledger};
use crate::session::Signer;
use crate::state::SwapRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub pool: String,
    /// true: pay X, receive Y
    pub is_in_x: bool,
    pub amount_in: i128,
    /// Slippage bound; the swap fails rather than pay less
    pub min_amount_out: i128,
    /// Refuse to execute if the pool moved since this seqno was read
    pub expected_seqno: Option<u64>,
}

impl SwapRequest {
    pub fn new(pool: impl Into<String>, is_in_x: bool, amount_in: i128) -> Self {
        Self {
            pool: pool.into(),
            is_in_x,
            amount_in,
            min_amount_out: 0,
            expected_seqno: None,
        }
    }

    pub fn min_amount_out(mut self, min_amount_out: i128) -> Self {
        self.min_amount_out = min_amount_out;
        self
    }

    pub fn expected_seqno(mut self, seqno: u64) -> Self {
        self.expected_seqno = Some(seqno);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub pool: String,
    /// Pool seqno after the swap
    pub seqno: u64,
    pub amount_in: i128,
    pub amount_out: i128,
    pub fee: i128,
    pub reserves_before: Reserves,
    pub reserves_after: Reserves,
}

impl Ledger {
    /// Execute a swap against a pool.
    ///
    /// All checks run before any state changes: on error the ledger is left
    /// untouched. A zero `amount_in` succeeds with a zero output and commits
    /// nothing.
    pub fn swap(&mut self, signer: &dyn Signer, req: &SwapRequest) -> Result<SwapReceipt> {
        ensure_user_signer(signer, "swap")?;
        validate_amount(req.min_amount_out)?;
        let trader = signer.account().clone();

        let state = self.pool_info(&req.pool)?;
        if let Some(expected) = req.expected_seqno {
            if expected != state.header.seqno {
                warn!("swap on {} refused: seqno {} != {}", req.pool, expected, state.header.seqno);
                return Err(PoolError::SeqnoMismatch {
                    pool: req.pool.clone(),
                    expected,
                    found: state.header.seqno,
                });
            }
        }

        let before = state.reserves;
        let params = state.params;
        let result = apply_with(&params, before, req.is_in_x, req.amount_in).map_err(|e| {
            warn!("swap on {} rejected: {} (amount_in={})", req.pool, e.code(), req.amount_in);
            e
        })?;

        if result.amount_out < req.min_amount_out {
            return Err(PoolError::InsufficientAmountOut {
                amount_out: result.amount_out,
                min_amount_out: req.min_amount_out,
            });
        }

        if req.amount_in == 0 {
            return Ok(SwapReceipt {
                pool: req.pool.clone(),
                seqno: state.header.seqno,
                amount_in: 0,
                amount_out: 0,
                fee: 0,
                reserves_before: before,
                reserves_after: before,
            });
        }

        if !invariant_preserved(&params, &before, req.is_in_x, &result)? {
            return Err(PoolError::InvariantViolation(req.pool.clone()));
        }

        let pool_account = state.account();
        let (token_in, token_out) = state.tokens(req.is_in_x);
        let (token_in, token_out) = (token_in.to_string(), token_out.to_string());
        let (amount_in, amount_out) = (req.amount_in, result.amount_out);

        // Input leg: trader -> pool, spent from the trader's allowance to the pool
        let tin = self.token(&token_in)?;
        let allowance_left = tin.allowance_after(&trader, &pool_account, amount_in)?;
        let trader_in = tin.debited(&trader, amount_in)?;
        let pool_in = tin.credited(&pool_account, amount_in)?;

        // Output leg: pool -> trader
        let tout = self.token(&token_out)?;
        let pool_out = tout.debited(&pool_account, amount_out)?;
        let trader_out = tout.credited(&trader, amount_out)?;

        // Everything validated; commit token legs, reserves and history together.
        let tin = self.token_mut(&token_in)?;
        tin.set_allowance(&trader, &pool_account, allowance_left);
        tin.set_balance(&trader, trader_in);
        tin.set_balance(&pool_account, pool_in);

        let tout = self.token_mut(&token_out)?;
        tout.set_balance(&pool_account, pool_out);
        tout.set_balance(&trader, trader_out);

        let sequence = self.bump_sequence();
        let state = self
            .pools
            .get_mut(&req.pool)
            .ok_or_else(|| PoolError::UnknownPool(req.pool.clone()))?;
        state.reserves = result.new_reserves;
        state.header.increment_seqno();
        let seqno = state.header.seqno;

        self.record_swap(
            &req.pool,
            SwapRecord {
                seqno,
                sequence,
                trader: trader.clone(),
                is_in_x: req.is_in_x,
                amount_in,
                amount_out,
                fee: result.fee,
                reserves_after: result.new_reserves,
            },
        );

        info!(
            "swap {}: {} paid {} {} for {} {} (fee {}), reserves ({}, {}) -> ({}, {})",
            req.pool,
            trader,
            amount_in,
            token_in,
            amount_out,
            token_out,
            result.fee,
            before.x,
            before.y,
            result.new_reserves.x,
            result.new_reserves.y
        );

        Ok(SwapReceipt {
            pool: req.pool.clone(),
            seqno,
            amount_in,
            amount_out,
            fee: result.fee,
            reserves_before: before,
            reserves_after: result.new_reserves,
        })
    }
}
