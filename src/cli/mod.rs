#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::engine::DEFAULT_TABLE;
use crate::storage::validate_table_name;
use crate::types::OperationMode;

#[derive(Debug, Parser)]
#[command(author, version, about = "Replay retail transactions as row-level database changes", long_about = None)]
pub struct Cli {
    /// Available log levels: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Use the "Kaggle Online Retail II UCI" dataset
    KaggleOnlineRetailUci(ReplayArgs)
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// the CSV data file
    #[arg(long)]
    pub data_file: PathBuf,

    /// the number of invoices to sample, 0 replays every invoice
    #[arg(long, default_value_t = 0)]
    pub invoices: usize,

    /// the database connection string
    #[arg(long)]
    pub db_conn: String,

    /// seconds to wait between database operations
    #[arg(long, default_value = "1", value_parser = parse_delay)]
    pub operation_delay: Duration,

    /// the operation mode
    #[arg(long, value_enum, default_value_t = OperationMode::Insert)]
    pub operation_mode: OperationMode,

    /// the target table
    #[arg(long, default_value = DEFAULT_TABLE, value_parser = parse_table)]
    pub table: String,

    /// seed for invoice sampling
    #[arg(long)]
    pub seed: Option<u64>
}

/// Settings of a single run, fixed once the command line is parsed.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    pub data_file: PathBuf,
    pub invoices: usize,
    pub db_conn: String,
    pub delay: Duration,
    pub mode: OperationMode,
    pub table: String,
    pub seed: Option<u64>
}

impl From<ReplayArgs> for ReplayConfig {
    fn from(args: ReplayArgs) -> Self {
        Self {
            data_file: args.data_file,
            invoices: args.invoices,
            db_conn: args.db_conn,
            delay: args.operation_delay,
            mode: args.operation_mode,
            table: args.table,
            seed: args.seed
        }
    }
}

impl Commands {
    pub fn into_config(self) -> ReplayConfig {
        match self {
            Commands::KaggleOnlineRetailUci(args) => args.into()
        }
    }
}

fn parse_delay(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value.trim().parse()
        .map_err(|error| format!("'{value}' is not a number of seconds: {error}"))?;

    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("'{value}' must be a finite, non-negative number of seconds"))
}

fn parse_table(value: &str) -> Result<String, String> {
    validate_table_name(value).map_err(|error| error.to_string())?;

    Ok(value.to_string())
}
