//! Accounts and signing authority
//!
//! Callers hand a [`Signer`] to every operation that moves funds instead of
//! configuring a shared client with "the current public key".

use core::fmt;
use serde::{Deserialize, Serialize};

const POOL_ACCOUNT_PREFIX: &str = "pool/";

/// Opaque account address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The account a pool holds its reserves in. Only the ledger moves
    /// funds out of it.
    pub fn pool(symbol: &str) -> Self {
        Self(format!("{}{}", POOL_ACCOUNT_PREFIX, symbol))
    }

    pub fn is_pool_account(&self) -> bool {
        self.0.starts_with(POOL_ACCOUNT_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Authority to act for one account.
pub trait Signer {
    fn account(&self) -> &AccountId;
}

/// A signer bound to one account for the lifetime of a caller's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    account: AccountId,
}

impl Session {
    pub fn new(account: impl Into<AccountId>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

impl Signer for Session {
    fn account(&self) -> &AccountId {
        &self.account
    }
}
