//! Token operations

use agentpool_pool::{AccountId, Signer};
use anyhow::Result;
use colored::Colorize;

use crate::config::CliConfig;
use crate::store::{load_ledger, update_ledger};

pub fn create_token(config: &CliConfig, symbol: String, name: String, cap: i128) -> Result<()> {
    let session = config.session()?;
    update_ledger(&config.ledger_path, |ledger| {
        ledger.create_token(&session, &symbol, &name, cap)?;
        Ok(())
    })?;

    println!("{}", "=== Token Created ===".bright_green().bold());
    println!("{} {}", "Symbol:".bright_cyan(), symbol);
    println!("{} {}", "Name:".bright_cyan(), name);
    println!("{} {}", "Cap:".bright_cyan(), cap);
    println!("{} {}", "Owner:".bright_cyan(), session.account());
    Ok(())
}

pub fn mint(config: &CliConfig, symbol: String, to: String, amount: i128) -> Result<()> {
    let session = config.session()?;
    let to = AccountId::new(to);
    let balance = update_ledger(&config.ledger_path, |ledger| {
        ledger.mint(&session, &symbol, &to, amount)?;
        Ok(ledger.balance(&symbol, &to)?)
    })?;

    println!("{} {} {} to {}", "Minted".bright_green(), amount, symbol, to);
    println!("{} {}", "New balance:".bright_cyan(), balance);
    Ok(())
}

pub fn transfer(config: &CliConfig, symbol: String, to: String, amount: i128) -> Result<()> {
    let session = config.session()?;
    let to = AccountId::new(to);
    update_ledger(&config.ledger_path, |ledger| {
        Ok(ledger.transfer(&session, &symbol, &to, amount)?)
    })?;

    println!(
        "{} {} {} {} -> {}",
        "Transferred".bright_green(),
        amount,
        symbol,
        session.account(),
        to
    );
    Ok(())
}

pub fn approve(config: &CliConfig, symbol: String, spender: String, amount: i128) -> Result<()> {
    let session = config.session()?;
    let spender = AccountId::new(spender);
    update_ledger(&config.ledger_path, |ledger| {
        Ok(ledger.approve(&session, &symbol, &spender, amount)?)
    })?;

    println!(
        "{} {} may spend {} {} from {}",
        "Approved:".bright_green(),
        spender,
        amount,
        symbol,
        session.account()
    );
    Ok(())
}

/// Balance of `account`, or of the configured account when omitted.
pub fn show_balance(config: &CliConfig, symbol: String, account: Option<String>) -> Result<()> {
    let account = match account {
        Some(account) => AccountId::new(account),
        None => config.session()?.account().clone(),
    };
    let ledger = load_ledger(&config.ledger_path)?;
    let balance = ledger.balance(&symbol, &account)?;

    println!("{} {} {}", format!("{}:", account).bright_cyan(), balance, symbol);
    Ok(())
}

pub fn show_token_info(config: &CliConfig, symbol: String) -> Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let token = ledger.token(&symbol)?;

    println!("{}", "=== Token Info ===".bright_green().bold());
    println!("{} {}", "Symbol:".bright_cyan(), token.symbol);
    println!("{} {}", "Name:".bright_cyan(), token.name);
    println!("{} {}", "Decimals:".bright_cyan(), token.decimals);
    println!("{} {}", "Owner:".bright_cyan(), token.owner);
    println!("{} {}", "Supply:".bright_cyan(), token.total_supply);
    println!("{} {}", "Cap:".bright_cyan(), token.cap);

    println!("\n{}", "Holders:".bright_cyan());
    for (holder, balance) in token.holders() {
        println!("  {:<24} {}", holder.to_string(), balance);
    }
    Ok(())
}
