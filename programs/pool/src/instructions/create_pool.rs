//! Create pool instruction
//!
//! Deploys the agent token (owned by the pool, cap = initial supply), mints
//! the whole supply into the pool and seeds the peer side from the creator.

use amm_model::{Reserves, SwapParams};
use log::info;

use crate::error::{PoolError, Result};
use crate::ledger::{ensure_user_signer, validate_symbol, Ledger};
use crate::session::{AccountId, Signer};
use crate::state::{PoolHeader, PoolState, TokenLedger};
use crate::DEFAULT_INITIAL_RESERVE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePool {
    /// Agent token symbol; also names the pool
    pub symbol: String,
    pub name: String,
    /// Existing token the agent token is paired with
    pub peer_token: String,
    pub initial_x: i128,
    pub initial_y: i128,
    pub params: SwapParams,
}

impl CreatePool {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, peer_token: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            peer_token: peer_token.into(),
            initial_x: DEFAULT_INITIAL_RESERVE,
            initial_y: DEFAULT_INITIAL_RESERVE,
            params: SwapParams::CONTRACT,
        }
    }

    pub fn with_reserves(mut self, initial_x: i128, initial_y: i128) -> Self {
        self.initial_x = initial_x;
        self.initial_y = initial_y;
        self
    }

    pub fn with_params(mut self, params: SwapParams) -> Self {
        self.params = params;
        self
    }
}

impl Ledger {
    pub fn create_pool(&mut self, signer: &dyn Signer, req: CreatePool) -> Result<&PoolState> {
        ensure_user_signer(signer, "create a pool")?;
        validate_symbol(&req.symbol)?;
        Reserves::new(req.initial_x, req.initial_y).validate()?;
        req.params.validate()?;
        if self.pools.contains_key(&req.symbol) {
            return Err(PoolError::PoolExists(req.symbol));
        }
        if self.tokens.contains_key(&req.symbol) {
            return Err(PoolError::TokenExists(req.symbol));
        }

        let creator = signer.account().clone();
        let pool_account = AccountId::pool(&req.symbol);

        let peer = self.token(&req.peer_token)?;
        let creator_y = peer.debited(&creator, req.initial_y)?;
        let pool_y = peer.credited(&pool_account, req.initial_y)?;

        let mut agent = TokenLedger::new(&req.symbol, &req.name, pool_account.clone(), req.initial_x);
        agent.mint(&pool_account, req.initial_x)?;

        // Everything validated; commit.
        let peer = self.token_mut(&req.peer_token)?;
        peer.set_balance(&creator, creator_y);
        peer.set_balance(&pool_account, pool_y);
        self.tokens.insert(req.symbol.clone(), agent);

        let sequence = self.bump_sequence();
        let state = PoolState {
            header: PoolHeader::new(&req.symbol, creator.clone(), sequence),
            token_x: req.symbol.clone(),
            token_y: req.peer_token.clone(),
            reserves: Reserves::new(req.initial_x, req.initial_y),
            params: req.params,
        };
        self.pools.insert(req.symbol.clone(), state);

        info!(
            "pool created: {} / {} reserves=({}, {}) fee_bps={} creator={}",
            req.symbol, req.peer_token, req.initial_x, req.initial_y, req.params.fee_bps, creator
        );
        self.pool_info(&req.symbol)
    }
}
