//! End-to-end flows: launch an agent pool, quote, trade, and reconcile.
//!
//! Every trade here goes through the ledger, which computes its results with
//! the same engine functions a UI would call for quotes.

use agentpool_e2e_tests::{Market, PEER};
use agentpool_pool::{
    amm_model, AccountId, AmmError, CreatePool, PoolError, Reserves, Rounding, Session, Signer,
    SwapParams, SwapRequest,
};

fn million_pool(market: &mut Market) -> String {
    market
        .launch(CreatePool::new("AGENT", "Agent Smith", PEER).with_reserves(1_000_000, 1_000_000))
        .unwrap()
}

#[test]
fn test_first_trade_on_fresh_pool() {
    let mut market = Market::new(&["alice"], 10_000_000).unwrap();
    let pool = million_pool(&mut market);
    let alice = market.traders[0].clone();

    // Pools start full of agent token, so the first buyer pays in the peer token.
    // By symmetry this is the 1M/1M, 2000-in trade.
    let quote = market.ledger.quote(&pool, false, 2_000).unwrap();
    assert_eq!(quote.amount_out, 1_997);
    assert_eq!(
        quote.amount_out,
        amm_model::quote(Reserves::new(1_000_000, 1_000_000), true, 2_000).unwrap()
    );

    let receipt = market
        .ledger
        .swap(&alice, &SwapRequest::new(&pool, false, 2_000).expected_seqno(quote.seqno))
        .unwrap();
    assert_eq!(receipt.amount_out, 1_997);
    assert_eq!(receipt.reserves_after, Reserves::new(998_003, 1_002_000));
    assert_eq!(market.ledger.balance(&pool, alice.account()).unwrap(), 1_997);
    assert_eq!(market.ledger.balance(PEER, alice.account()).unwrap(), 9_998_000);
}

#[test]
fn test_zero_amount_is_a_no_op() {
    let mut market = Market::new(&["alice"], 10_000_000).unwrap();
    let pool = million_pool(&mut market);
    let alice = market.traders[0].clone();
    let before = market.ledger.clone();

    let receipt = market.ledger.swap(&alice, &SwapRequest::new(&pool, false, 0)).unwrap();
    assert_eq!(receipt.amount_out, 0);
    assert_eq!(receipt.reserves_after, receipt.reserves_before);
    assert_eq!(market.ledger, before);
}

#[test]
fn test_oversized_and_negative_trades_rejected() {
    let mut market = Market::new(&["alice"], 10_000_000).unwrap();
    let pool = market
        .launch(CreatePool::new("TINY", "Tiny", PEER).with_reserves(100, 100))
        .unwrap();
    let alice = market.traders[0].clone();
    let before = market.ledger.clone();

    let err = market.ledger.swap(&alice, &SwapRequest::new(&pool, false, 10_000)).unwrap_err();
    assert_eq!(err, PoolError::Amm(AmmError::InsufficientLiquidity));
    assert_eq!(market.ledger, before);

    let err = market.ledger.swap(&alice, &SwapRequest::new(&pool, false, -5)).unwrap_err();
    assert_eq!(err, PoolError::Amm(AmmError::InvalidAmount));
    assert_eq!(market.ledger, before);
}

#[test]
fn test_repeated_buys_get_worse_prices() {
    let mut market = Market::new(&["alice"], 10_000_000).unwrap();
    let pool = million_pool(&mut market);
    let alice = market.traders[0].clone();

    let mut outs = Vec::new();
    for _ in 0..5 {
        let receipt = market.ledger.swap(&alice, &SwapRequest::new(&pool, false, 2_000)).unwrap();
        outs.push(receipt.amount_out);
    }
    assert_eq!(&outs[..2], &[1_997, 1_989]);
    assert!(outs.windows(2).all(|w| w[1] < w[0]), "outputs {:?}", outs);
    assert_eq!(market.ledger.history(&pool).unwrap().len(), 5);
}

#[test]
fn test_round_trip_through_default_pool() {
    let mut market = Market::new(&["alice"], 1_000_000).unwrap();
    let pool = market.launch(CreatePool::new("PEPE", "PEPE THE MOON", PEER)).unwrap();
    let alice = market.traders[0].clone();

    let bought = market.ledger.swap(&alice, &SwapRequest::new(&pool, false, 50_000)).unwrap();
    assert_eq!(bought.amount_out, 33_334);
    assert_eq!(bought.reserves_after, Reserves::new(66_666, 150_000));

    market.approve_all(&alice, &pool, &pool).unwrap();
    let sold = market
        .ledger
        .swap(&alice, &SwapRequest::new(&pool, true, bought.amount_out))
        .unwrap();
    assert_eq!(sold.amount_out, 50_001);

    // The agent token is back in the pool; the peer side kept one unit of rounding.
    assert_eq!(market.ledger.balance(&pool, alice.account()).unwrap(), 0);
    assert_eq!(market.ledger.balance(PEER, alice.account()).unwrap(), 1_000_001);
    assert_eq!(
        market.ledger.pool_info(&pool).unwrap().reserves,
        Reserves::new(100_000, 99_999)
    );
}

#[test]
fn test_stale_quote_must_be_reconciled() {
    let mut market = Market::new(&["alice", "bob"], 10_000_000).unwrap();
    let pool = million_pool(&mut market);
    let (alice, bob) = (market.traders[0].clone(), market.traders[1].clone());

    let alice_quote = market.ledger.quote(&pool, false, 100_000).unwrap();
    market.ledger.swap(&bob, &SwapRequest::new(&pool, false, 100_000)).unwrap();

    let err = market
        .ledger
        .swap(
            &alice,
            &SwapRequest::new(&pool, false, 100_000)
                .expected_seqno(alice_quote.seqno)
                .min_amount_out(alice_quote.amount_out),
        )
        .unwrap_err();
    assert_eq!(
        err,
        PoolError::SeqnoMismatch { pool: pool.clone(), expected: 0, found: 1 }
    );

    // Requote; the fresh number is worse and the slippage bound catches the old one.
    let fresh = market.ledger.quote(&pool, false, 100_000).unwrap();
    assert!(fresh.amount_out < alice_quote.amount_out);
    let err = market
        .ledger
        .swap(
            &alice,
            &SwapRequest::new(&pool, false, 100_000).min_amount_out(alice_quote.amount_out),
        )
        .unwrap_err();
    assert!(matches!(err, PoolError::InsufficientAmountOut { .. }));

    let receipt = market
        .ledger
        .swap(&alice, &SwapRequest::new(&pool, false, 100_000).expected_seqno(fresh.seqno))
        .unwrap();
    assert_eq!(receipt.amount_out, fresh.amount_out);
}

#[test]
fn test_pool_account_cannot_trade_or_move_funds() {
    let mut market = Market::new(&["alice"], 1_000_000).unwrap();
    let pool = market.launch(CreatePool::new("PEPE", "PEPE", PEER)).unwrap();
    let impostor = Session::new(AccountId::pool(&pool));

    let err = market
        .ledger
        .swap(&impostor, &SwapRequest::new(&pool, true, 10))
        .unwrap_err();
    assert!(matches!(err, PoolError::Unauthorized { .. }));

    let err = market
        .ledger
        .transfer(&impostor, &pool, &AccountId::from("thief"), 10)
        .unwrap_err();
    assert!(matches!(err, PoolError::Unauthorized { .. }));
}

#[test]
fn test_fee_pool_grows_k_and_ledger_persists() {
    let mut market = Market::new(&["alice", "bob"], 10_000_000).unwrap();
    let pool = market
        .launch(
            CreatePool::new("FEE", "Fee Agent", PEER)
                .with_reserves(1_000_000, 1_000_000)
                .with_params(SwapParams::new(30, Rounding::Ceil)),
        )
        .unwrap();
    let k0 = market.ledger.pool_info(&pool).unwrap().k().unwrap();

    for trader in market.traders.clone() {
        let receipt = market.ledger.swap(&trader, &SwapRequest::new(&pool, false, 10_000)).unwrap();
        assert!(receipt.fee > 0);
        assert!(receipt.reserves_after.k().unwrap() > receipt.reserves_before.k().unwrap());
    }
    assert!(market.ledger.pool_info(&pool).unwrap().k().unwrap() > k0);

    let json = serde_json::to_string(&market.ledger).unwrap();
    let restored: agentpool_pool::Ledger = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, market.ledger);
    assert_eq!(restored.history(&pool).unwrap().len(), 2);
}
