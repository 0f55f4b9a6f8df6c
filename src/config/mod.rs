#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::types::Monetary;

pub const DEFAULT_SHEET: &str = "CashCuddle.xlsx";
pub const DEFAULT_DATABASE: &str = "cashcuddle.db";

#[derive(Debug, Parser)]
#[command(name = "cashcuddle", version, about = "Reconcile a spending sheet against the stored ledger")]
pub struct Cli {
    /// Deposit (+) or withdraw (-) before syncing; 0 skips
    #[arg(short, long, allow_hyphen_values = true)]
    pub deposit: Option<Monetary>,

    /// Spending sheet to reconcile (.xlsx, .xls, .ods or .csv)
    #[arg(short, long, env = "CASHCUDDLE_FILE", default_value = DEFAULT_SHEET)]
    pub file: PathBuf,

    /// SQLite ledger database
    #[arg(long, env = "CASHCUDDLE_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Balance to start from when the ledger is created
    #[arg(long, env = "CASHCUDDLE_INITIAL_BALANCE", default_value = "0.00", allow_hyphen_values = true)]
    pub initial_balance: Monetary,

    /// error, warn, info, debug or trace
    #[arg(long, env = "CASHCUDDLE_LOG", default_value = "warn")]
    pub log_level: String
}

/// Resolved run settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub deposit: Option<Monetary>,
    pub file: PathBuf,
    pub database: PathBuf,
    pub initial_balance: Monetary,
    pub log_level: LevelFilter,
    /// Set when the binary was started without arguments; adjustments are
    /// then prompted for and the default sheet is used.
    pub interactive: bool
}

impl Config {
    pub fn from_cli(cli: Cli, interactive: bool) -> Self {
        let file = if interactive { PathBuf::from(DEFAULT_SHEET) } else { cli.file };

        Self {
            deposit: cli.deposit.filter(|amount| !amount.is_zero()),
            file,
            database: cli.database,
            initial_balance: cli.initial_balance,
            log_level: parse_log_level(&cli.log_level),
            interactive
        }
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}
