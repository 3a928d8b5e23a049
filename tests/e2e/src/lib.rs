//! Shared fixtures for end-to-end pool flows

use agentpool_pool::{AccountId, CreatePool, Ledger, Session, Signer};
use anyhow::{Context, Result};

pub const PEER: &str = "USDX";
pub const PEER_SUPPLY: i128 = 1_000_000_000;

/// A ledger with the peer token and a few funded, signed-in actors.
pub struct Market {
    pub ledger: Ledger,
    pub issuer: Session,
    pub creator: Session,
    pub traders: Vec<Session>,
}

impl Market {
    pub fn new(traders: &[&str], funding: i128) -> Result<Self> {
        let mut ledger = Ledger::new();
        let issuer = Session::new("issuer");
        let creator = Session::new("creator");

        ledger
            .create_token(&issuer, PEER, "Test Dollar", PEER_SUPPLY)
            .context("create peer token")?;
        ledger
            .mint(&issuer, PEER, creator.account(), funding)
            .context("fund creator")?;

        let traders: Vec<Session> = traders.iter().map(|t| Session::new(*t)).collect();
        for trader in &traders {
            ledger
                .mint(&issuer, PEER, trader.account(), funding)
                .with_context(|| format!("fund {}", trader.account()))?;
        }

        Ok(Self {
            ledger,
            issuer,
            creator,
            traders,
        })
    }

    /// Launch an agent pool and let every trader spend peer tokens through it.
    pub fn launch(&mut self, req: CreatePool) -> Result<String> {
        let symbol = req.symbol.clone();
        self.ledger
            .create_pool(&self.creator, req)
            .with_context(|| format!("create pool {}", symbol))?;

        let pool = AccountId::pool(&symbol);
        for trader in &self.traders {
            let allowance = self.ledger.balance(PEER, trader.account())?;
            self.ledger.approve(trader, PEER, &pool, allowance)?;
        }
        Ok(symbol)
    }

    /// Approve the pool for everything `signer` holds of `symbol`.
    pub fn approve_all(&mut self, signer: &Session, symbol: &str, pool: &str) -> Result<()> {
        let amount = self.ledger.balance(symbol, signer.account())?;
        self.ledger.approve(signer, symbol, &AccountId::pool(pool), amount)?;
        Ok(())
    }
}
