//! Agent pool ledger
//!
//! The authoritative owner of pool reserves and token balances. Every
//! mutating call takes `&mut Ledger` plus an explicit [`Signer`], so there is
//! exactly one writer at a time and no ambient wallet session.
//!
//! Swap pricing is delegated to [`amm_model`]; this crate only validates,
//! moves tokens and commits the reserve pair the engine returns.

pub mod error;
pub mod instructions;
pub mod ledger;
pub mod session;
pub mod state;

pub use amm_model::{self, AmmError, Reserves, Rounding, SwapParams};
pub use error::{PoolError, Result};
pub use instructions::{CreatePool, Quote, SwapReceipt, SwapRequest};
pub use ledger::{Ledger, HISTORY_LIMIT};
pub use session::{AccountId, Session, Signer};
pub use state::{PoolHeader, PoolState, PoolStatus, SwapRecord, TokenLedger};

/// Default agent token supply and virtual peer reserve of a new pool.
pub const DEFAULT_INITIAL_RESERVE: i128 = 100_000;
