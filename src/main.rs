mod prompt;

use std::fmt::Display;
use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use cashcuddle::config::{Cli, Config};
use cashcuddle::ingest;
use cashcuddle::{Monetary, Reconciler, SqliteLedgerStore, SyncSummary};

fn main() -> Result<()> {
    let interactive = std::env::args_os().len() <= 1;
    let config = Config::from_cli(Cli::parse(), interactive);

    setup_logging(config.log_level);

    let store = SqliteLedgerStore::open(&config.database, config.initial_balance)?;
    let mut reconciler = Reconciler::new(store);

    let adjustment = if config.interactive {
        prompt::adjustment()?
    } else {
        config.deposit
    };

    let mut balance = reconciler.balance()?;

    if let Some(delta) = adjustment {
        balance = reconciler.apply_adjustment(delta)?;
        write_adjustment_to_stdout(delta)?;
    }

    println!("Balance : ${balance}");

    let batch = match ingest::read_batch(&config.file) {
        Ok(batch) => batch,
        Err(error) if error.is_not_found() => {
            //NOTE: A missing sheet is expected on runs that only move money
            if adjustment.is_none() {
                warn!("{error}");
            }
            return Ok(());
        }
        Err(error) => fail(error)
    };

    let timer = Instant::now();
    let summary = match reconciler.reconcile(&batch) {
        Ok(summary) => summary,
        Err(error) => fail(error)
    };

    info!("Reconciled {} in: {:?}", config.file.display(), timer.elapsed());

    write_summary_to_stdout(&summary)?;

    Ok(())
}

fn fail(error: impl Display) -> ! {
    error!("{error}");
    exit(1);
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the user-facing report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_adjustment_to_stdout(delta: Monetary) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    if delta.is_negative() {
        writeln!(output, "Withdrawn ${}", delta.abs())?;
    } else {
        writeln!(output, "Deposited ${delta}")?;
    }

    output.flush()?;

    Ok(())
}

fn write_summary_to_stdout(summary: &SyncSummary) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    if summary.deleted > 0 {
        writeln!(output, "Deleted {} transaction(s)", summary.deleted)?;
    }

    if summary.inserted > 0 {
        writeln!(output, "Inserted {} new expense(s)", summary.inserted)?;
    } else {
        writeln!(output, "No new expenses")?;
    }

    writeln!(output, "Remaining balance : ${}", summary.final_balance)?;

    output.flush()?;

    Ok(())
}
