//! Offline trade simulation
//!
//! Runs the engine on a hypothetical pool without touching any ledger. Each
//! step repeats the same trade against the reserves left by the previous one,
//! which makes the curve's price impact visible.

use agentpool_pool::amm_model::{apply_with, execution_price, Reserves, SwapParams};
use anyhow::{Context, Result};
use colored::Colorize;

use crate::trading::format_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub amount_out: i128,
    pub fee: i128,
    /// Execution price; None for a zero trade or an unrepresentable price
    pub price: Option<i128>,
    pub reserves: Reserves,
}

/// Apply the same trade `steps` times, stopping at the first rejection.
pub fn run_steps(
    params: &SwapParams,
    reserves: Reserves,
    is_in_x: bool,
    amount_in: i128,
    steps: usize,
) -> Result<Vec<Step>> {
    let mut current = reserves;
    let mut out = Vec::with_capacity(steps);

    for n in 1..=steps {
        let result = apply_with(params, current, is_in_x, amount_in)
            .with_context(|| format!("Step {} rejected at reserves ({}, {})", n, current.x, current.y))?;
        let price = execution_price(amount_in, result.amount_out).ok();
        current = result.new_reserves;
        out.push(Step {
            amount_out: result.amount_out,
            fee: result.fee,
            price,
            reserves: current,
        });
    }
    Ok(out)
}

pub fn simulate(
    params: SwapParams,
    reserves: Reserves,
    is_in_x: bool,
    amount_in: i128,
    steps: usize,
) -> Result<()> {
    println!("{}", "=== Swap Simulation ===".bright_green().bold());
    println!("{} ({}, {})", "Start reserves:".bright_cyan(), reserves.x, reserves.y);
    println!("{} {} {}", "Trade:".bright_cyan(), amount_in, if is_in_x { "X -> Y" } else { "Y -> X" });
    println!("{} {} bps, {:?}", "Params:".bright_cyan(), params.fee_bps, params.rounding);
    println!("{} {}\n", "k:".bright_cyan(), reserves.k()?);

    let steps = run_steps(&params, reserves, is_in_x, amount_in, steps)?;
    println!("  {:>4} {:>20} {:>10} {:>16}   reserves", "step", "out", "fee", "price");
    for (n, step) in steps.iter().enumerate() {
        println!(
            "  {:>4} {:>20} {:>10} {:>16}   ({}, {})",
            n + 1,
            step.amount_out,
            step.fee,
            step.price.map(format_price).unwrap_or_else(|| "n/a".into()),
            step.reserves.x,
            step.reserves.y
        );
    }

    println!("\n{}", "Simulation only; nothing was committed.".dimmed());
    Ok(())
}
