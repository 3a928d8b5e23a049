//! Ledger - root of all token and pool state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PoolError, Result};
use crate::session::{AccountId, Signer};
use crate::state::{PoolState, SwapRecord, TokenLedger};

const MAX_SYMBOL_LEN: usize = 12;

/// Swap records kept per pool; older ones are dropped on commit.
pub const HISTORY_LIMIT: usize = 1_000;

/// All tokens, pools and swap history.
///
/// Mutations go through the `instructions` methods, which validate
/// everything before touching state so a failed call leaves the ledger
/// exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Bumped on every successful mutation
    pub(crate) sequence: u64,
    pub(crate) tokens: BTreeMap<String, TokenLedger>,
    pub(crate) pools: BTreeMap<String, PoolState>,
    #[serde(default)]
    pub(crate) history: BTreeMap<String, Vec<SwapRecord>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn token(&self, symbol: &str) -> Result<&TokenLedger> {
        self.tokens
            .get(symbol)
            .ok_or_else(|| PoolError::UnknownToken(symbol.to_string()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &TokenLedger> {
        self.tokens.values()
    }

    /// Pool state as last committed.
    pub fn pool_info(&self, symbol: &str) -> Result<&PoolState> {
        self.pools
            .get(symbol)
            .ok_or_else(|| PoolError::UnknownPool(symbol.to_string()))
    }

    pub fn pools(&self) -> impl Iterator<Item = &PoolState> {
        self.pools.values()
    }

    /// Most recent committed swaps of a pool (up to [`HISTORY_LIMIT`]), oldest first.
    pub fn history(&self, symbol: &str) -> Result<&[SwapRecord]> {
        self.pool_info(symbol)?;
        Ok(self.history.get(symbol).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn balance(&self, symbol: &str, account: &AccountId) -> Result<i128> {
        Ok(self.token(symbol)?.balance(account))
    }

    pub fn allowance(&self, symbol: &str, owner: &AccountId, spender: &AccountId) -> Result<i128> {
        Ok(self.token(symbol)?.allowance(owner, spender))
    }

    pub(crate) fn token_mut(&mut self, symbol: &str) -> Result<&mut TokenLedger> {
        self.tokens
            .get_mut(symbol)
            .ok_or_else(|| PoolError::UnknownToken(symbol.to_string()))
    }

    pub(crate) fn record_swap(&mut self, pool: &str, record: SwapRecord) {
        let records = self.history.entry(pool.to_string()).or_default();
        records.push(record);
        if records.len() > HISTORY_LIMIT {
            let excess = records.len() - HISTORY_LIMIT;
            records.drain(..excess);
        }
    }

    pub(crate) fn bump_sequence(&mut self) -> u64 {
        self.sequence = self.sequence.wrapping_add(1);
        self.sequence
    }
}

pub(crate) fn validate_symbol(symbol: &str) -> Result<()> {
    let ok = !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol.chars().all(|c| c.is_ascii_alphanumeric());
    if ok {
        Ok(())
    } else {
        Err(PoolError::InvalidSymbol(symbol.to_string()))
    }
}

pub(crate) fn validate_amount(amount: i128) -> Result<()> {
    if amount < 0 {
        Err(PoolError::InvalidAmount(amount))
    } else {
        Ok(())
    }
}

/// Pool accounts are moved only by the ledger itself.
pub(crate) fn ensure_user_signer(signer: &dyn Signer, action: &'static str) -> Result<()> {
    if signer.account().is_pool_account() {
        return Err(PoolError::Unauthorized {
            account: signer.account().clone(),
            action,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use amm_model::Reserves;

    fn record(seqno: u64) -> SwapRecord {
        SwapRecord {
            seqno,
            sequence: seqno,
            trader: AccountId::from("alice"),
            is_in_x: false,
            amount_in: 10,
            amount_out: 9,
            fee: 0,
            reserves_after: Reserves::new(100, 100),
        }
    }

    #[test]
    fn test_history_keeps_most_recent() {
        let mut ledger = Ledger::new();
        for seqno in 1..=(HISTORY_LIMIT as u64 + 3) {
            ledger.record_swap("PEPE", record(seqno));
        }

        let kept = &ledger.history["PEPE"];
        assert_eq!(kept.len(), HISTORY_LIMIT);
        assert_eq!(kept.first().map(|r| r.seqno), Some(4));
        assert_eq!(kept.last().map(|r| r.seqno), Some(HISTORY_LIMIT as u64 + 3));
    }

    #[test]
    fn test_symbol_rules() {
        assert!(validate_symbol("PEPE").is_ok());
        assert!(validate_symbol("AGENT42").is_ok());
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("pool/X").is_err());
        assert!(validate_symbol("ABCDEFGHIJKLM").is_err());
    }

    #[test]
    fn test_empty_ledger_lookups() {
        let ledger = Ledger::new();
        assert_eq!(ledger.sequence(), 0);
        assert_eq!(ledger.pool_info("PEPE").unwrap_err(), PoolError::UnknownPool("PEPE".into()));
        assert_eq!(ledger.token("USDX").unwrap_err(), PoolError::UnknownToken("USDX".into()));
    }

    #[test]
    fn test_pool_accounts_cannot_sign() {
        let forged = Session::new(AccountId::pool("PEPE"));
        assert!(matches!(
            ensure_user_signer(&forged, "swap"),
            Err(PoolError::Unauthorized { .. })
        ));
        assert!(ensure_user_signer(&Session::new("alice"), "swap").is_ok());
    }
}
