//! Capped fungible token ledger

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PoolError, Result};
use crate::session::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLedger {
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    /// Only the owner may mint
    pub owner: AccountId,
    /// Upper bound on total supply
    pub cap: i128,
    pub total_supply: i128,
    balances: BTreeMap<AccountId, i128>,
    /// owner -> spender -> amount
    allowances: BTreeMap<AccountId, BTreeMap<AccountId, i128>>,
}

impl TokenLedger {
    pub const DECIMALS: u32 = 18;

    pub fn new(symbol: impl Into<String>, name: impl Into<String>, owner: AccountId, cap: i128) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            decimals: Self::DECIMALS,
            owner,
            cap,
            total_supply: 0,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    pub fn balance(&self, account: &AccountId) -> i128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> i128 {
        self.allowances
            .get(owner)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Accounts with a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, i128)> {
        self.balances.iter().map(|(a, b)| (a, *b))
    }

    /// Balance `account` would have after paying `amount`.
    pub(crate) fn debited(&self, account: &AccountId, amount: i128) -> Result<i128> {
        let available = self.balance(account);
        if available < amount {
            return Err(PoolError::InsufficientBalance {
                token: self.symbol.clone(),
                account: account.clone(),
                available,
                required: amount,
            });
        }
        Ok(available - amount)
    }

    /// Balance `account` would have after receiving `amount`.
    pub(crate) fn credited(&self, account: &AccountId, amount: i128) -> Result<i128> {
        self.balance(account)
            .checked_add(amount)
            .ok_or_else(|| PoolError::Overflow(self.symbol.clone()))
    }

    /// Allowance left after `spender` uses `amount` of `owner`'s funds.
    pub(crate) fn allowance_after(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: i128,
    ) -> Result<i128> {
        let available = self.allowance(owner, spender);
        if available < amount {
            return Err(PoolError::InsufficientAllowance {
                token: self.symbol.clone(),
                owner: owner.clone(),
                spender: spender.clone(),
                available,
                required: amount,
            });
        }
        Ok(available - amount)
    }

    pub(crate) fn set_balance(&mut self, account: &AccountId, balance: i128) {
        if balance == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), balance);
        }
    }

    pub(crate) fn set_allowance(&mut self, owner: &AccountId, spender: &AccountId, amount: i128) {
        if amount == 0 {
            if let Some(m) = self.allowances.get_mut(owner) {
                m.remove(spender);
                if m.is_empty() {
                    self.allowances.remove(owner);
                }
            }
        } else {
            self.allowances
                .entry(owner.clone())
                .or_default()
                .insert(spender.clone(), amount);
        }
    }

    pub(crate) fn mint(&mut self, to: &AccountId, amount: i128) -> Result<()> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| PoolError::Overflow(self.symbol.clone()))?;
        if supply > self.cap {
            return Err(PoolError::CapExceeded {
                token: self.symbol.clone(),
                amount,
                cap: self.cap,
            });
        }
        let balance = self.credited(to, amount)?;

        self.total_supply = supply;
        self.set_balance(to, balance);
        Ok(())
    }

    pub(crate) fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: i128) -> Result<()> {
        let from_balance = self.debited(from, amount)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.credited(to, amount)?;

        self.set_balance(from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> TokenLedger {
        TokenLedger::new("USDX", "Test Dollar", AccountId::from("issuer"), 1_000)
    }

    #[test]
    fn test_mint_under_cap() {
        let mut t = token();
        let alice = AccountId::from("alice");
        t.mint(&alice, 600).unwrap();
        assert_eq!(t.balance(&alice), 600);
        assert_eq!(t.total_supply, 600);
    }

    #[test]
    fn test_mint_exact_cap() {
        let mut t = token();
        t.mint(&AccountId::from("alice"), 1_000).unwrap();
        assert_eq!(t.total_supply, 1_000);
    }

    #[test]
    fn test_mint_exceeds_cap_leaves_supply() {
        let mut t = token();
        let alice = AccountId::from("alice");
        t.mint(&alice, 600).unwrap();

        let err = t.mint(&alice, 500).unwrap_err();
        assert!(matches!(err, PoolError::CapExceeded { cap: 1_000, .. }));
        assert_eq!(t.total_supply, 600);
        assert_eq!(t.balance(&alice), 600);
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut t = token();
        let (alice, bob) = (AccountId::from("alice"), AccountId::from("bob"));
        t.mint(&alice, 100).unwrap();
        t.transfer(&alice, &bob, 40).unwrap();

        assert_eq!(t.balance(&alice), 60);
        assert_eq!(t.balance(&bob), 40);

        let err = t.transfer(&alice, &bob, 61).unwrap_err();
        assert!(matches!(err, PoolError::InsufficientBalance { available: 60, required: 61, .. }));
        assert_eq!(t.balance(&bob), 40);
    }

    #[test]
    fn test_zero_balances_are_pruned() {
        let mut t = token();
        let (alice, bob) = (AccountId::from("alice"), AccountId::from("bob"));
        t.mint(&alice, 10).unwrap();
        t.transfer(&alice, &bob, 10).unwrap();
        assert_eq!(t.holders().count(), 1);
    }

    #[test]
    fn test_allowance_set_and_spent() {
        let mut t = token();
        let (alice, pool) = (AccountId::from("alice"), AccountId::pool("PEPE"));
        t.set_allowance(&alice, &pool, 50);
        assert_eq!(t.allowance(&alice, &pool), 50);
        assert_eq!(t.allowance_after(&alice, &pool, 20).unwrap(), 30);
        assert!(t.allowance_after(&alice, &pool, 51).is_err());

        t.set_allowance(&alice, &pool, 0);
        assert_eq!(t.allowance(&alice, &pool), 0);
    }
}
