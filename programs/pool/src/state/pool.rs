//! Pool state - one constant product pool per agent token

use amm_model::{spot_price, AmmError, Reserves, SwapParams};
use serde::{Deserialize, Serialize};

use crate::session::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolHeader {
    /// Agent token symbol, also the pool's key
    pub symbol: String,
    pub creator: AccountId,
    /// Bumped on every committed swap
    pub seqno: u64,
    /// Ledger sequence at creation
    pub created_at: u64,
}

impl PoolHeader {
    pub fn new(symbol: impl Into<String>, creator: AccountId, created_at: u64) -> Self {
        Self {
            symbol: symbol.into(),
            creator,
            seqno: 0,
            created_at,
        }
    }

    pub fn increment_seqno(&mut self) {
        self.seqno = self.seqno.wrapping_add(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    /// Both reserves positive, accepting trades
    Active,
    /// A reserve is empty; only reachable through external replenishment
    Drained,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub header: PoolHeader,
    /// Agent token deployed by the pool
    pub token_x: String,
    /// Peer token the agent token trades against
    pub token_y: String,
    pub reserves: Reserves,
    pub params: SwapParams,
}

impl PoolState {
    pub fn symbol(&self) -> &str {
        &self.header.symbol
    }

    /// Account holding the pool's tokens.
    pub fn account(&self) -> AccountId {
        AccountId::pool(&self.header.symbol)
    }

    /// Current x·y, derived from the reserves.
    pub fn k(&self) -> Result<i128, AmmError> {
        self.reserves.k()
    }

    pub fn status(&self) -> PoolStatus {
        if self.reserves.is_active() {
            PoolStatus::Active
        } else {
            PoolStatus::Drained
        }
    }

    /// (token paid in, token paid out) for a direction.
    pub fn tokens(&self, is_in_x: bool) -> (&str, &str) {
        if is_in_x {
            (&self.token_x, &self.token_y)
        } else {
            (&self.token_y, &self.token_x)
        }
    }

    /// Price of the input token in output units, scaled by 1e6.
    pub fn spot_price(&self, is_in_x: bool) -> Result<i128, AmmError> {
        spot_price(self.reserves, is_in_x)
    }
}

/// One committed swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    /// Pool seqno after the swap
    pub seqno: u64,
    /// Ledger sequence of the commit
    pub sequence: u64,
    pub trader: AccountId,
    pub is_in_x: bool,
    pub amount_in: i128,
    pub amount_out: i128,
    pub fee: i128,
    pub reserves_after: Reserves,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(x: i128, y: i128) -> PoolState {
        PoolState {
            header: PoolHeader::new("PEPE", AccountId::from("alice"), 1),
            token_x: "PEPE".into(),
            token_y: "USDX".into(),
            reserves: Reserves::new(x, y),
            params: SwapParams::CONTRACT,
        }
    }

    #[test]
    fn test_status_tracks_reserves() {
        assert_eq!(pool(10, 10).status(), PoolStatus::Active);
        assert_eq!(pool(0, 10).status(), PoolStatus::Drained);
    }

    #[test]
    fn test_tokens_follow_direction() {
        let p = pool(10, 10);
        assert_eq!(p.tokens(true), ("PEPE", "USDX"));
        assert_eq!(p.tokens(false), ("USDX", "PEPE"));
        assert_eq!(p.account(), AccountId::pool("PEPE"));
    }

    #[test]
    fn test_k_is_derived() {
        let mut p = pool(100_000, 100_000);
        assert_eq!(p.k().unwrap(), 10_000_000_000);
        p.reserves = Reserves::new(66_666, 150_000);
        assert_eq!(p.k().unwrap(), 9_999_900_000);
    }

    #[test]
    fn test_seqno_increments() {
        let mut h = PoolHeader::new("PEPE", AccountId::from("alice"), 0);
        h.increment_seqno();
        h.increment_seqno();
        assert_eq!(h.seqno, 2);
    }
}
