//! Ledger file storage
//!
//! The ledger lives in one JSON file. Writers load it, mutate it in memory
//! and replace the file atomically (write to a sibling temp file, then rename),
//! so a failed command never leaves a half-written ledger behind.

use agentpool_pool::Ledger;
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CliConfig;

/// Load the ledger, failing with a hint if it was never initialized.
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        anyhow::bail!(
            "Ledger file not found: {}\n\
             Create one with: agentpool init",
            path.display()
        );
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger file: {}", path.display()))?;

    let ledger: Ledger = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse ledger file: {}", path.display()))?;

    debug!("loaded ledger {} at sequence {}", path.display(), ledger.sequence());
    Ok(ledger)
}

/// Atomically replace the ledger file.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(ledger).context("Failed to serialize ledger")?;
    let tmp = temp_path(path);
    fs::write(&tmp, data).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace ledger file: {}", path.display()))?;

    debug!("saved ledger {} at sequence {}", path.display(), ledger.sequence());
    Ok(())
}

/// Load, apply `f`, and save only if `f` succeeded.
pub fn update_ledger<T>(path: &Path, f: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
    let mut ledger = load_ledger(path)?;
    let out = f(&mut ledger)?;
    save_ledger(path, &ledger)?;
    Ok(out)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn init_ledger(config: &CliConfig, force: bool) -> Result<()> {
    let path = &config.ledger_path;
    if path.exists() && !force {
        anyhow::bail!(
            "Ledger already exists: {}\n\
             Pass --force to replace it",
            path.display()
        );
    }

    save_ledger(path, &Ledger::new())?;
    println!("{} {}", "Initialized ledger:".bright_green(), path.display());
    Ok(())
}
