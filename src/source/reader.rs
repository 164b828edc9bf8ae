use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use crate::models::{TransactionRow, COLUMNS};
use crate::source::distinct_invoices;
use crate::source::SourceError;

/// Reads every transaction row of a CSV file, in file order.
///
/// The header row must contain all canonical columns; extra columns are
/// ignored. Field values are kept verbatim, only header names are trimmed.
/// Any row that fails to deserialize rejects the whole file.
pub fn load(path: &Path) -> Result<Vec<TransactionRow>, SourceError> {
    info!("Reading the transactions file [{}]...", path.display());

    let file = File::open(path).map_err(|error| SourceError::unreadable(path, error))?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()
        .map_err(|error| SourceError::unreadable(path, error))?
        .clone();

    let missing = missing_columns(&headers);

    if !missing.is_empty() {
        return Err(SourceError::missing_columns(path, &missing))
    }

    let rows = reader.deserialize::<TransactionRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| SourceError::unreadable(path, error))?;

    log_metadata(&headers, &rows);

    Ok(rows)
}

fn missing_columns(headers: &StringRecord) -> Vec<&'static str> {
    COLUMNS.iter()
        .map(|column| column.header)
        .filter(|header| !headers.iter().any(|present| present == *header))
        .collect()
}

fn log_metadata(headers: &StringRecord, rows: &[TransactionRow]) {
    info!("  > Rows: {}", rows.len());
    info!("  > Distinct invoices: {}", distinct_invoices(rows).len());
    info!("  > Columns: {:?}", headers.iter().collect::<Vec<_>>());
}
