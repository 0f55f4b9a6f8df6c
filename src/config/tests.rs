use super::{parse_log_level, Cli, Config, DEFAULT_SHEET};

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[test]
fn test_cli_accepts_negative_adjustments() -> Result<()> {
    let cli = Cli::try_parse_from(["cashcuddle", "--deposit", "-12.505", "--file", "march.csv", "--log-level", "debug"])?;
    let config = Config::from_cli(cli, false);

    assert_eq!(config.deposit.map(|amount| amount.to_string()), Some("-12.51".to_string()));
    assert_eq!(config.file, PathBuf::from("march.csv"));
    assert_eq!(config.log_level, LevelFilter::DEBUG);
    assert!(!config.interactive);

    Ok(())
}

#[test]
fn test_zero_deposit_means_no_adjustment() -> Result<()> {
    let cli = Cli::try_parse_from(["cashcuddle", "-d", "0", "--initial-balance", "150"])?;
    let config = Config::from_cli(cli, false);

    assert!(config.deposit.is_none());
    assert_eq!(config.initial_balance.to_string(), "150.00");

    Ok(())
}

#[test]
fn test_interactive_runs_use_the_default_sheet() -> Result<()> {
    let cli = Cli::try_parse_from(["cashcuddle", "--file", "ignored.csv"])?;
    let config = Config::from_cli(cli, true);

    assert_eq!(config.file, PathBuf::from(DEFAULT_SHEET));

    Ok(())
}

#[test]
fn test_cli_rejects_malformed_amounts() {
    assert!(Cli::try_parse_from(["cashcuddle", "--deposit", "lots"]).is_err());
}

#[test]
fn test_unknown_log_level_falls_back_to_warn() {
    assert_eq!(parse_log_level("ERROR"), LevelFilter::ERROR);
    assert_eq!(parse_log_level("chatty"), LevelFilter::WARN);
}
