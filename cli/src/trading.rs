//! Quotes and swaps

use agentpool_pool::{amm_model::PRICE_SCALE, Signer, SwapRequest};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use crate::config::CliConfig;
use crate::store::{load_ledger, update_ledger};

/// Render a PRICE_SCALE fixed-point price as a decimal.
pub fn format_price(price: i128) -> String {
    let sign = if price < 0 { "-" } else { "" };
    let abs = price.unsigned_abs();
    let scale = PRICE_SCALE as u128;
    format!("{}{}.{:06}", sign, abs / scale, abs % scale)
}

/// Render signed basis points as a percentage.
pub fn format_bps(bps: i128) -> String {
    let sign = if bps < 0 { "-" } else { "" };
    let abs = bps.unsigned_abs();
    format!("{}{}.{:02}%", sign, abs / 100, abs % 100)
}

pub fn quote(config: &CliConfig, pool: String, is_in_x: bool, amount_in: i128) -> Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let state = ledger.pool_info(&pool)?;
    let (token_in, token_out) = state.tokens(is_in_x);
    let quote = ledger.quote(&pool, is_in_x, amount_in)?;

    println!("{}", "=== Quote ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), pool);
    println!("{} {} {}", "Pay:".bright_cyan(), amount_in, token_in);
    println!("{} {} {}", "Receive:".bright_cyan(), quote.amount_out, token_out);
    println!("{} {} {}", "Fee:".bright_cyan(), quote.fee, token_in);
    println!(
        "{} 1 {} = {} {}",
        "Spot price:".bright_cyan(),
        token_in,
        quote.spot_price.map(format_price).unwrap_or_else(|| "n/a".into()),
        token_out
    );
    println!(
        "{} {}",
        "Price impact:".bright_cyan(),
        quote.price_impact_bps.map(format_bps).unwrap_or_else(|| "n/a".into())
    );
    println!("{} {}", "Pool seqno:".bright_cyan(), quote.seqno);

    println!(
        "\n{}",
        "Quotes are advisory. The pool may move before you swap; pass --min-out and --expected-seqno to bound it."
            .yellow()
    );
    Ok(())
}

pub fn quote_in(config: &CliConfig, pool: String, is_in_x: bool, amount_out: i128) -> Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let state = ledger.pool_info(&pool)?;
    let (token_in, token_out) = state.tokens(is_in_x);
    let amount_in = ledger.quote_amount_in(&pool, is_in_x, amount_out)?;
    let actual = ledger.quote(&pool, is_in_x, amount_in)?;

    println!("{}", "=== Reverse Quote ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), pool);
    println!("{} {} {}", "Want:".bright_cyan(), amount_out, token_out);
    println!("{} {} {}", "Pay at least:".bright_cyan(), amount_in, token_in);
    println!("{} {} {}", "Receive:".bright_cyan(), actual.amount_out, token_out);
    println!("\n{}", "Quotes are advisory.".yellow());
    Ok(())
}

/// Execute a swap against the ledger on disk.
///
/// The ledger is re-read right before the swap, so the result reflects every
/// committed change, whatever an earlier quote said.
pub fn swap(
    config: &CliConfig,
    pool: String,
    is_in_x: bool,
    amount_in: i128,
    min_out: i128,
    expected_seqno: Option<u64>,
) -> Result<()> {
    let session = config.session()?;
    let mut req = SwapRequest::new(&pool, is_in_x, amount_in).min_amount_out(min_out);
    if let Some(seqno) = expected_seqno {
        req = req.expected_seqno(seqno);
    }

    let (receipt, token_in, token_out) = update_ledger(&config.ledger_path, |ledger| {
        let receipt = ledger.swap(&session, &req)?;
        let (token_in, token_out) = ledger.pool_info(&pool)?.tokens(is_in_x);
        Ok((receipt, token_in.to_string(), token_out.to_string()))
    })
    .with_context(|| format!("Swap on {} failed", pool))?;

    info!("swap committed on {} at seqno {}", pool, receipt.seqno);

    println!("{}", "=== Swap Executed ===".bright_green().bold());
    println!("{} {}", "Trader:".bright_cyan(), session.account());
    println!("{} {} {}", "Paid:".bright_cyan(), receipt.amount_in, token_in);
    println!("{} {} {}", "Received:".bright_cyan(), receipt.amount_out, token_out);
    println!("{} {} {}", "Fee:".bright_cyan(), receipt.fee, token_in);
    println!(
        "{} ({}, {}) -> ({}, {})",
        "Reserves:".bright_cyan(),
        receipt.reserves_before.x,
        receipt.reserves_before.y,
        receipt.reserves_after.x,
        receipt.reserves_after.y
    );
    println!("{} {}", "Pool seqno:".bright_cyan(), receipt.seqno);
    Ok(())
}
