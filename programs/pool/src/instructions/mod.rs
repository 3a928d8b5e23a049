pub mod create_pool;
pub mod quote;
pub mod swap;
pub mod token;

pub use create_pool::CreatePool;
pub use quote::Quote;
pub use swap::{SwapReceipt, SwapRequest};
