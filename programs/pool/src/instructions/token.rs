//! Fungible token instructions: create, mint, transfer, approve, transfer_from

use log::{debug, info};

use crate::error::{PoolError, Result};
use crate::ledger::{ensure_user_signer, validate_amount, validate_symbol, Ledger};
use crate::session::{AccountId, Signer};
use crate::state::TokenLedger;

impl Ledger {
    /// Register a new token owned by the signer.
    pub fn create_token(
        &mut self,
        signer: &dyn Signer,
        symbol: &str,
        name: &str,
        cap: i128,
    ) -> Result<&TokenLedger> {
        ensure_user_signer(signer, "create a token")?;
        validate_symbol(symbol)?;
        validate_amount(cap)?;
        if self.tokens.contains_key(symbol) {
            return Err(PoolError::TokenExists(symbol.to_string()));
        }

        let token = TokenLedger::new(symbol, name, signer.account().clone(), cap);
        self.tokens.insert(symbol.to_string(), token);
        self.bump_sequence();

        info!("token created: {} ({}) cap={} owner={}", symbol, name, cap, signer.account());
        self.token(symbol)
    }

    /// Mint new supply. Owner only, bounded by the cap.
    pub fn mint(&mut self, signer: &dyn Signer, symbol: &str, to: &AccountId, amount: i128) -> Result<()> {
        validate_amount(amount)?;
        let token = self.token_mut(symbol)?;
        if &token.owner != signer.account() {
            return Err(PoolError::Unauthorized {
                account: signer.account().clone(),
                action: "mint",
            });
        }
        token.mint(to, amount)?;
        self.bump_sequence();

        debug!("minted {} {} to {}", amount, symbol, to);
        Ok(())
    }

    pub fn transfer(&mut self, signer: &dyn Signer, symbol: &str, to: &AccountId, amount: i128) -> Result<()> {
        ensure_user_signer(signer, "transfer")?;
        validate_amount(amount)?;
        self.token_mut(symbol)?.transfer(signer.account(), to, amount)?;
        self.bump_sequence();

        debug!("transfer {} {} {} -> {}", amount, symbol, signer.account(), to);
        Ok(())
    }

    /// Set (not add to) the amount `spender` may move from the signer.
    pub fn approve(&mut self, signer: &dyn Signer, symbol: &str, spender: &AccountId, amount: i128) -> Result<()> {
        ensure_user_signer(signer, "approve")?;
        validate_amount(amount)?;
        self.token_mut(symbol)?.set_allowance(signer.account(), spender, amount);
        self.bump_sequence();

        debug!("approve {} {} {} -> {}", amount, symbol, signer.account(), spender);
        Ok(())
    }

    /// Move `from`'s funds as the signing spender, consuming allowance.
    pub fn transfer_from(
        &mut self,
        signer: &dyn Signer,
        symbol: &str,
        from: &AccountId,
        to: &AccountId,
        amount: i128,
    ) -> Result<()> {
        ensure_user_signer(signer, "transfer_from")?;
        validate_amount(amount)?;
        let spender = signer.account();
        let token = self.token_mut(symbol)?;
        let remaining = token.allowance_after(from, spender, amount)?;
        token.transfer(from, to, amount)?;
        token.set_allowance(from, spender, remaining);
        self.bump_sequence();

        debug!("transfer_from {} {} {} -> {} by {}", amount, symbol, from, to, spender);
        Ok(())
    }
}
