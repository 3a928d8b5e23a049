pub mod pool;
pub mod token;

pub use pool::{PoolHeader, PoolState, PoolStatus, SwapRecord};
pub use token::TokenLedger;
