mod cli;
mod engine;
mod models;
mod source;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;
use tokio::signal::ctrl_c;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::cli::Cli;
use crate::engine::{ReplaySummary, Runner};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let mut runner = Runner::new(cli.command.into_config());

    let timer = Instant::now();

    //NOTE: Interrupting drops the in-flight run, batches already replayed stay in the database.
    let summary = tokio::select! {
        result = runner.run() => result?,
        _ = ctrl_c() => {
            warn!("Interrupted, stopping the replay");
            return Err(anyhow!("Replay interrupted"))
        }
    };

    let duration = timer.elapsed();

    info!("Replayed {} invoices in: {duration:?} [{}]", summary.batches(), runner.state());

    write_summary_to_stdout(&summary)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the replay report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_summary_to_stdout(summary: &ReplaySummary) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "invoice,rows_affected")?;

    for outcome in &summary.outcomes {
        writeln!(output, "{},{}", outcome.invoice, outcome.rows_affected)?;
    }

    output.flush()?;

    Ok(())
}
