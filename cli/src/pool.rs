//! Pool operations: launch an agent token pool and inspect pools

use agentpool_pool::{CreatePool, PoolState, Signer, SwapParams};
use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::CliConfig;
use crate::store::{load_ledger, update_ledger};
use crate::trading::format_price;

pub fn create_pool(
    config: &CliConfig,
    symbol: String,
    name: String,
    peer: String,
    initial_x: i128,
    initial_y: i128,
    params: SwapParams,
) -> Result<()> {
    let session = config.session()?;
    let req = CreatePool::new(&symbol, &name, &peer)
        .with_reserves(initial_x, initial_y)
        .with_params(params);

    let state = update_ledger(&config.ledger_path, |ledger| {
        Ok(ledger.create_pool(&session, req)?.clone())
    })
    .with_context(|| format!("Failed to create pool {}", symbol))?;

    println!("{}", "=== Pool Created ===".bright_green().bold());
    println!("{} {} ({})", "Agent token:".bright_cyan(), symbol, name);
    println!("{} {}", "Creator:".bright_cyan(), session.account());
    print_state(&state)
}

pub fn show_pool_info(config: &CliConfig, symbol: String) -> Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let state = ledger.pool_info(&symbol)?;

    println!("{}", "=== Pool Info ===".bright_green().bold());
    println!("{} {}", "Creator:".bright_cyan(), state.header.creator);
    println!("{} {}", "Created at:".bright_cyan(), state.header.created_at);
    print_state(state)
}

pub fn list_pools(config: &CliConfig) -> Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;

    println!("{}", "=== Pools ===".bright_green().bold());
    let mut count = 0;
    for state in ledger.pools() {
        println!(
            "  {:<12} {:>20} {:<8} {:>20} {:<8} seqno={} {:?}",
            state.symbol(),
            state.reserves.x,
            state.token_x,
            state.reserves.y,
            state.token_y,
            state.header.seqno,
            state.status()
        );
        count += 1;
    }
    if count == 0 {
        println!("{}", "No pools yet".dimmed());
    }
    Ok(())
}

pub fn show_history(config: &CliConfig, symbol: String, limit: usize) -> Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let state = ledger.pool_info(&symbol)?;
    let history = ledger.history(&symbol)?;

    println!("{} {}", "=== Swap History ===".bright_green().bold(), symbol);
    if history.is_empty() {
        println!("{}", "No swaps yet".dimmed());
        return Ok(());
    }

    for record in history.iter().rev().take(limit) {
        let (token_in, token_out) = state.tokens(record.is_in_x);
        println!(
            "  #{:<6} {:<16} {} {} -> {} {} (fee {}) reserves ({}, {})",
            record.seqno,
            record.trader.to_string(),
            record.amount_in,
            token_in,
            record.amount_out,
            token_out,
            record.fee,
            record.reserves_after.x,
            record.reserves_after.y
        );
    }
    Ok(())
}

fn print_state(state: &PoolState) -> Result<()> {
    println!("{} {}", "Pool:".bright_cyan(), state.symbol());
    println!("{} {}", "Account:".bright_cyan(), state.account());
    println!("{} {:?}", "Status:".bright_cyan(), state.status());
    println!("{} {} {}", "Reserve X:".bright_cyan(), state.reserves.x, state.token_x);
    println!("{} {} {}", "Reserve Y:".bright_cyan(), state.reserves.y, state.token_y);
    println!("{} {}", "Fee (bps):".bright_cyan(), state.params.fee_bps);
    println!("{} {:?}", "Rounding:".bright_cyan(), state.params.rounding);
    println!("{} {}", "Seqno:".bright_cyan(), state.header.seqno);

    if state.reserves.is_active() {
        let k = state.k().map(|k| k.to_string()).unwrap_or_else(|_| "n/a".into());
        println!("{} {}", "k:".bright_cyan(), k);
        println!(
            "{} 1 {} = {} {}",
            "Spot price:".bright_cyan(),
            state.token_x,
            state.spot_price(true).map(format_price).unwrap_or_else(|_| "n/a".into()),
            state.token_y
        );
    }
    Ok(())
}
