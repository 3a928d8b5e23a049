//! Agent pool CLI - launch agent tokens and trade them against constant product pools
//!
//! Every agent token is paired with a peer token in an x*y=k pool. Quotes are
//! advisory; swaps are committed to a local JSON ledger that stands in for
//! the on-chain state.

use agentpool_pool::{Reserves, Rounding, SwapParams, DEFAULT_INITIAL_RESERVE};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

mod config;
mod pool;
mod simulate;
mod store;
mod token;
mod trading;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "agentpool")]
#[command(about = "Agent pool CLI - launch agent tokens and swap against constant product pools", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/agentpool/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to ledger file (overrides config)
    #[arg(short, long)]
    ledger: Option<PathBuf>,

    /// Account to sign with (overrides config)
    #[arg(short, long)]
    account: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Trade direction, named by the token paid in
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    /// Pay the agent token, receive the peer token
    X,
    /// Pay the peer token, receive the agent token
    Y,
}

impl Side {
    fn is_in_x(self) -> bool {
        self == Side::X
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoundingArg {
    /// Contract-compatible: floor the new output reserve
    Floor,
    /// Pool-favoring: ceil the new output reserve so k never decreases
    Ceil,
}

impl From<RoundingArg> for Rounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Floor => Rounding::Floor,
            RoundingArg::Ceil => Rounding::Ceil,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty ledger
    Init {
        /// Replace an existing ledger
        #[arg(long)]
        force: bool,
    },

    /// Token operations
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Pool operations
    Pool {
        #[command(subcommand)]
        command: PoolCommands,
    },

    /// Advisory quote for a swap
    Quote {
        /// Pool (agent token symbol)
        pool: String,

        /// Token paid in
        side: Side,

        /// Amount paid in
        #[arg(allow_negative_numbers = true)]
        amount: i128,
    },

    /// Smallest input that yields a given output
    QuoteIn {
        /// Pool (agent token symbol)
        pool: String,

        /// Token paid in
        side: Side,

        /// Desired output amount
        #[arg(allow_negative_numbers = true)]
        amount_out: i128,
    },

    /// Execute a swap
    Swap {
        /// Pool (agent token symbol)
        pool: String,

        /// Token paid in
        side: Side,

        /// Amount paid in
        #[arg(allow_negative_numbers = true)]
        amount: i128,

        /// Fail rather than receive less than this
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        min_out: i128,

        /// Fail if the pool moved since this seqno (from `quote`)
        #[arg(long)]
        expected_seqno: Option<u64>,
    },

    /// Repeat a trade against hypothetical reserves, offline
    Simulate {
        #[arg(long, allow_negative_numbers = true)]
        reserve_x: i128,

        #[arg(long, allow_negative_numbers = true)]
        reserve_y: i128,

        /// Token paid in
        side: Side,

        /// Amount paid in per step
        #[arg(allow_negative_numbers = true)]
        amount: i128,

        #[arg(long, default_value = "5")]
        steps: usize,

        /// Input fee in basis points (default: config)
        #[arg(long, allow_negative_numbers = true)]
        fee_bps: Option<i128>,

        /// Rounding mode (default: config)
        #[arg(long, value_enum)]
        rounding: Option<RoundingArg>,
    },

    /// Run built-in smoke tests on a scratch ledger
    Test {
        /// Engine scenarios only
        #[arg(long)]
        quick: bool,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Create a token owned by the signing account
    Create {
        symbol: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Maximum total supply
        #[arg(long, allow_negative_numbers = true)]
        cap: i128,
    },

    /// Mint supply (token owner only)
    Mint {
        symbol: String,
        to: String,
        #[arg(allow_negative_numbers = true)]
        amount: i128,
    },

    /// Transfer from the signing account
    Transfer {
        symbol: String,
        to: String,
        #[arg(allow_negative_numbers = true)]
        amount: i128,
    },

    /// Set the amount a spender (e.g. pool/PEPE) may move from the signing account
    Approve {
        symbol: String,
        spender: String,
        #[arg(allow_negative_numbers = true)]
        amount: i128,
    },

    /// Show a balance
    Balance {
        symbol: String,

        /// Account (default: the signing account)
        account: Option<String>,
    },

    /// Show token details and holders
    Info { symbol: String },
}

#[derive(Subcommand)]
enum PoolCommands {
    /// Launch an agent token and its pool
    Create {
        /// Agent token symbol, also names the pool
        symbol: String,

        /// Agent token display name
        #[arg(long)]
        name: String,

        /// Peer token the agent token trades against
        #[arg(long)]
        peer: String,

        /// Agent token supply, all of it seeded into the pool
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_INITIAL_RESERVE)]
        initial_x: i128,

        /// Peer token moved from the creator into the pool
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_INITIAL_RESERVE)]
        initial_y: i128,

        /// Input fee in basis points (default: config)
        #[arg(long, allow_negative_numbers = true)]
        fee_bps: Option<i128>,

        /// Rounding mode (default: config)
        #[arg(long, value_enum)]
        rounding: Option<RoundingArg>,
    },

    /// Show pool details
    Info { symbol: String },

    /// List all pools
    List,

    /// Show recent swaps, newest first
    History {
        symbol: String,

        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

/// Flags override the configured pool parameters.
fn resolve_params(config: &CliConfig, fee_bps: Option<i128>, rounding: Option<RoundingArg>) -> SwapParams {
    SwapParams::new(
        fee_bps.unwrap_or(config.params.fee_bps),
        rounding.map(Rounding::from).unwrap_or(config.params.rounding),
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.clone(), cli.ledger.clone(), cli.account.clone())?;

    if cli.verbose {
        println!("{} {}", "Config:".bright_cyan(), config.config_path.display());
        println!("{} {}", "Ledger:".bright_cyan(), config.ledger_path.display());
        if let Some(account) = &config.account {
            println!("{} {}", "Account:".bright_cyan(), account);
        }
    }

    // Execute command
    match cli.command {
        Commands::Init { force } => {
            store::init_ledger(&config, force)?;
        }
        Commands::Token { command } => match command {
            TokenCommands::Create { symbol, name, cap } => {
                token::create_token(&config, symbol, name, cap)?;
            }
            TokenCommands::Mint { symbol, to, amount } => {
                token::mint(&config, symbol, to, amount)?;
            }
            TokenCommands::Transfer { symbol, to, amount } => {
                token::transfer(&config, symbol, to, amount)?;
            }
            TokenCommands::Approve { symbol, spender, amount } => {
                token::approve(&config, symbol, spender, amount)?;
            }
            TokenCommands::Balance { symbol, account } => {
                token::show_balance(&config, symbol, account)?;
            }
            TokenCommands::Info { symbol } => {
                token::show_token_info(&config, symbol)?;
            }
        },
        Commands::Pool { command } => match command {
            PoolCommands::Create { symbol, name, peer, initial_x, initial_y, fee_bps, rounding } => {
                let params = resolve_params(&config, fee_bps, rounding);
                pool::create_pool(&config, symbol, name, peer, initial_x, initial_y, params)?;
            }
            PoolCommands::Info { symbol } => {
                pool::show_pool_info(&config, symbol)?;
            }
            PoolCommands::List => {
                pool::list_pools(&config)?;
            }
            PoolCommands::History { symbol, limit } => {
                pool::show_history(&config, symbol, limit)?;
            }
        },
        Commands::Quote { pool, side, amount } => {
            trading::quote(&config, pool, side.is_in_x(), amount)?;
        }
        Commands::QuoteIn { pool, side, amount_out } => {
            trading::quote_in(&config, pool, side.is_in_x(), amount_out)?;
        }
        Commands::Swap { pool, side, amount, min_out, expected_seqno } => {
            trading::swap(&config, pool, side.is_in_x(), amount, min_out, expected_seqno)?;
        }
        Commands::Simulate { reserve_x, reserve_y, side, amount, steps, fee_bps, rounding } => {
            let params = resolve_params(&config, fee_bps, rounding);
            simulate::simulate(params, Reserves::new(reserve_x, reserve_y), side.is_in_x(), amount, steps)?;
        }
        Commands::Test { quick } => {
            tests::run_smoke_tests(quick)?;
        }
    }

    Ok(())
}
