use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;
use sqlx::{Connection, SqliteConnection};
use tempfile::TempDir;

const BINARY: &str = env!("CARGO_BIN_EXE_cdc-replay");

fn sample_path() -> String {
    Path::new("samples").join("online_retail_sample.csv").display().to_string()
}

fn database_path(directory: &TempDir) -> PathBuf {
    directory.path().join("retail.db")
}

//NOTE: SQLAlchemy spelling, four slashes for an absolute path
fn database_url(directory: &TempDir) -> String {
    format!("sqlite:///{}", database_path(directory).display())
}

async fn open_database(directory: &TempDir) -> Result<SqliteConnection> {
    Ok(SqliteConnection::connect(&format!("sqlite://{}", database_path(directory).display())).await?)
}

fn replay(data_file: &str, db_conn: &str, mode: &str) -> Result<Output> {
    let output = Command::new(BINARY)
        .args([
            "kaggle-online-retail-uci",
            "--data-file", data_file,
            "--db-conn", db_conn,
            "--operation-delay", "0",
            "--operation-mode", mode,
            "--log-level", "error"
        ])
        .output()?;

    Ok(output)
}

fn report_lines(output: &Output) -> Result<Vec<(String, u64)>> {
    let stdout = String::from_utf8(output.stdout.clone())?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("invoice,rows_affected"));

    lines
        .map(|line| -> Result<(String, u64)> {
            let (invoice, rows) = line.split_once(',').ok_or_else(|| anyhow::anyhow!("Malformed report line [{line}]"))?;
            Ok((invoice.to_string(), rows.parse()?))
        })
        .collect()
}

async fn count_rows(directory: &TempDir) -> Result<i64> {
    let mut connection = open_database(directory).await?;
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(&mut connection)
        .await?;

    connection.close().await?;

    Ok(count)
}

#[tokio::test]
async fn test_cli_inserts_then_deletes_sample_invoices() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let db_conn = database_url(&directory);

    let inserted = replay(&sample_path(), &db_conn, "insert")?;

    assert!(inserted.status.success(), "{}", String::from_utf8_lossy(&inserted.stderr));
    assert_eq!(report_lines(&inserted)?, vec![
        ("489434".to_string(), 3),
        ("489435".to_string(), 1),
        ("489436".to_string(), 2),
        ("489437".to_string(), 1),
        ("C489449".to_string(), 1),
        ("489464".to_string(), 1)
    ]);
    assert_eq!(count_rows(&directory).await?, 9);

    let mut connection = open_database(&directory).await?;
    let description: String = sqlx::query_scalar("SELECT description FROM transactions WHERE invoice = '489435'")
        .fetch_one(&mut connection)
        .await?;

    connection.close().await?;

    assert_eq!(description, "CAT BOWL ");

    let deleted = replay(&sample_path(), &db_conn, "delete")?;

    assert!(deleted.status.success(), "{}", String::from_utf8_lossy(&deleted.stderr));

    let deleted_rows: u64 = report_lines(&deleted)?.iter().map(|(_, rows)| rows).sum();

    assert_eq!(deleted_rows, 9);
    assert_eq!(count_rows(&directory).await?, 0);

    Ok(())
}

#[test]
fn test_cli_samples_requested_number_of_invoices() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let db_conn = database_url(&directory);

    let output = Command::new(BINARY)
        .args([
            "kaggle-online-retail-uci",
            "--data-file", &sample_path(),
            "--db-conn", &db_conn,
            "--invoices", "2",
            "--seed", "42",
            "--operation-delay", "0"
        ])
        .output()?;

    assert!(output.status.success());
    assert_eq!(report_lines(&output)?.len(), 2);

    Ok(())
}

#[test]
fn test_cli_fails_for_missing_data_file() -> Result<()> {
    let directory = tempfile::tempdir()?;

    let output = replay("samples/missing.csv", &database_url(&directory), "insert")?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_fails_to_delete_from_missing_table() -> Result<()> {
    let directory = tempfile::tempdir()?;

    let output = replay(&sample_path(), &database_url(&directory), "delete")?;

    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stderr).matches("does not exist").count(), 1);

    Ok(())
}

#[test]
fn test_cli_fails_for_too_many_sampled_invoices() -> Result<()> {
    let directory = tempfile::tempdir()?;

    let output = Command::new(BINARY)
        .args([
            "kaggle-online-retail-uci",
            "--data-file", &sample_path(),
            "--db-conn", &database_url(&directory),
            "--invoices", "100"
        ])
        .output()?;

    assert!(!output.status.success());

    Ok(())
}

#[test]
fn test_cli_requires_a_subcommand() -> Result<()> {
    let output = Command::new(BINARY)
        .args(["--data-file", "test.csv"])
        .output()?;

    assert!(!output.status.success());

    Ok(())
}
