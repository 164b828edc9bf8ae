use super::{Cli, Commands};

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::types::OperationMode;

fn parse(arguments: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("cdc-replay").chain(arguments.iter().copied()))
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(parse(&["--data-file", "test.csv"]).is_err());
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    assert!(parse(&["kaggle"]).is_err());
}

#[test]
fn test_missing_mandatory_arguments_are_rejected() {
    assert!(parse(&["kaggle-online-retail-uci"]).is_err());
    assert!(parse(&["kaggle-online-retail-uci", "--data-file", "test.csv"]).is_err());
    assert!(parse(&["kaggle-online-retail-uci", "--db-conn", "sqlite::memory:"]).is_err());
}

#[test]
fn test_mandatory_arguments_apply_defaults() -> Result<()> {
    let cli = parse(&["kaggle-online-retail-uci", "--data-file", "test.csv", "--db-conn", "test-conn"])?;

    assert_eq!(cli.log_level, "info");

    let config = cli.command.into_config();

    assert_eq!(config.data_file, Path::new("test.csv"));
    assert_eq!(config.db_conn, "test-conn");
    assert_eq!(config.invoices, 0);
    assert_eq!(config.delay, Duration::from_secs(1));
    assert_eq!(config.mode, OperationMode::Insert);
    assert_eq!(config.table, "transactions");
    assert_eq!(config.seed, None);

    Ok(())
}

#[test]
fn test_optional_arguments_are_parsed() -> Result<()> {
    let cli = parse(&[
        "kaggle-online-retail-uci", "--data-file", "test.csv", "--invoices", "10",
        "--db-conn", "test-conn", "--operation-delay", "0.25", "--operation-mode", "delete",
        "--table", "retail_transactions", "--seed", "42", "--log-level", "debug"
    ])?;

    assert_eq!(cli.log_level, "debug");

    let Commands::KaggleOnlineRetailUci(args) = cli.command;

    assert_eq!(args.invoices, 10);
    assert_eq!(args.operation_delay, Duration::from_millis(250));
    assert_eq!(args.operation_mode, OperationMode::Delete);
    assert_eq!(args.table, "retail_transactions");
    assert_eq!(args.seed, Some(42));

    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() {
    let base = ["kaggle-online-retail-uci", "--data-file", "test.csv", "--db-conn", "test-conn"];

    for extra in [
        ["--operation-delay", "-1"],
        ["--operation-delay", "soon"],
        ["--operation-mode", "upsert"],
        ["--invoices", "-3"],
        ["--table", "transactions;--"]
    ] {
        let arguments: Vec<&str> = base.iter().chain(extra.iter()).copied().collect();

        assert!(parse(&arguments).is_err(), "Arguments {extra:?} should be rejected");
    }
}

#[test]
fn test_zero_delay_is_accepted() -> Result<()> {
    let cli = parse(&["kaggle-online-retail-uci", "--data-file", "test.csv", "--db-conn", "test-conn", "--operation-delay", "0"])?;

    assert!(cli.command.into_config().delay.is_zero());

    Ok(())
}
