use std::collections::HashSet;

use rand::seq::index;
use rand::Rng;
use tracing::info;

use crate::models::TransactionRow;
use crate::source::SourceError;
use crate::types::InvoiceId;

/// Returns the distinct invoice ids in order of first appearance.
pub fn distinct_invoices(rows: &[TransactionRow]) -> Vec<&str> {
    let mut seen = HashSet::new();

    rows.iter()
        .map(|row| row.invoice.as_str())
        .filter(|invoice| seen.insert(*invoice))
        .collect()
}

/// Narrows the rows down to `invoices` whole invoices picked uniformly at
/// random without replacement. Relative row order is preserved.
///
/// A sample size of zero returns the rows untouched.
pub fn sample_by_invoice<R: Rng + ?Sized>(rows: Vec<TransactionRow>, invoices: usize, rng: &mut R) -> Result<Vec<TransactionRow>, SourceError> {
    if invoices == 0 {
        return Ok(rows)
    }

    info!("Selecting {invoices} random invoices...");

    let available = distinct_invoices(&rows);
    let available_count = available.len();

    if invoices > available_count {
        return Err(SourceError::insufficient_invoices(invoices, available_count))
    }

    let selected: HashSet<InvoiceId> = index::sample(rng, available_count, invoices)
        .iter()
        .map(|position| available[position].to_string())
        .collect();

    let sampled: Vec<_> = rows.into_iter()
        .filter(|row| selected.contains(&row.invoice))
        .collect();

    info!("  > {} rows selected from {} of {} invoices", sampled.len(), invoices, available_count);

    Ok(sampled)
}
