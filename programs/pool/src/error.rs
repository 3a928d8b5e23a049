use amm_model::AmmError;
use thiserror::Error;

use crate::session::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("swap rejected ({code}): {0}", code = .0.code())]
    Amm(#[from] AmmError),

    #[error("unknown token: {0}")]
    UnknownToken(String),

    #[error("unknown pool: {0}")]
    UnknownPool(String),

    #[error("token already exists: {0}")]
    TokenExists(String),

    #[error("pool already exists: {0}")]
    PoolExists(String),

    #[error("symbol must be 1-12 ASCII letters or digits, got {0:?}")]
    InvalidSymbol(String),

    #[error("{account} is not authorized to {action}")]
    Unauthorized {
        account: AccountId,
        action: &'static str,
    },

    #[error("amount must be non-negative, got {0}")]
    InvalidAmount(i128),

    #[error("insufficient {token} balance for {account}: have {available}, need {required}")]
    InsufficientBalance {
        token: String,
        account: AccountId,
        available: i128,
        required: i128,
    },

    #[error("insufficient {token} allowance from {owner} to {spender}: have {available}, need {required}")]
    InsufficientAllowance {
        token: String,
        owner: AccountId,
        spender: AccountId,
        available: i128,
        required: i128,
    },

    #[error("minting {amount} {token} would exceed cap {cap}")]
    CapExceeded {
        token: String,
        amount: i128,
        cap: i128,
    },

    #[error("output {amount_out} is below the requested minimum {min_amount_out}")]
    InsufficientAmountOut {
        amount_out: i128,
        min_amount_out: i128,
    },

    #[error("pool {pool} changed since quote: expected seqno {expected}, found {found}")]
    SeqnoMismatch {
        pool: String,
        expected: u64,
        found: u64,
    },

    #[error("constant product check failed for pool {0}")]
    InvariantViolation(String),

    #[error("arithmetic overflow in {0} ledger")]
    Overflow(String),
}

pub type Result<T> = core::result::Result<T, PoolError>;
