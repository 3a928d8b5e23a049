//! CLI configuration: config file, ledger location and signing account

use agentpool_pool::{AccountId, Rounding, Session, SwapParams};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/agentpool/config.toml";
pub const DEFAULT_LEDGER_PATH: &str = "~/.config/agentpool/ledger.json";

/// On-disk config. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    ledger_path: Option<String>,
    account: Option<String>,
    /// TOML integers are 64-bit
    fee_bps: Option<i64>,
    rounding: Option<Rounding>,
}

pub struct CliConfig {
    pub config_path: PathBuf,
    pub ledger_path: PathBuf,
    pub account: Option<AccountId>,
    /// Defaults for new pools and offline simulation
    pub params: SwapParams,
}

impl CliConfig {
    /// Resolve settings with precedence flag > config file > default.
    pub fn load(
        config_path: Option<PathBuf>,
        ledger_path: Option<PathBuf>,
        account: Option<String>,
    ) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => expand(DEFAULT_CONFIG_PATH)?,
        };
        let file = read_config_file(&config_path)?;

        let ledger_path = match (ledger_path, &file.ledger_path) {
            (Some(path), _) => path,
            (None, Some(path)) => expand(path)?,
            (None, None) => expand(DEFAULT_LEDGER_PATH)?,
        };

        let params = SwapParams::new(
            file.fee_bps.map(i128::from).unwrap_or(SwapParams::CONTRACT.fee_bps),
            file.rounding.unwrap_or_default(),
        );
        params
            .validate()
            .with_context(|| format!("Invalid fee_bps in {}", config_path.display()))?;

        Ok(Self {
            config_path,
            ledger_path,
            account: account.or(file.account).map(AccountId::new),
            params,
        })
    }

    /// The signing session for mutating commands.
    pub fn session(&self) -> Result<Session> {
        match &self.account {
            Some(account) => Ok(Session::new(account.clone())),
            None => anyhow::bail!(
                "No account selected.\n\
                 Pass --account <id> or set `account` in {}",
                self.config_path.display()
            ),
        }
    }
}

/// A missing file yields the defaults; a malformed one is an error.
fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&data).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn expand(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).with_context(|| format!("Failed to expand path: {}", path))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
