use std::collections::HashMap;

use tracing::info;

use crate::models::{TransactionBatch, TransactionRow};
use crate::types::InvoiceId;

/// Partitions rows into one batch per invoice.
///
/// Batches follow the order in which each invoice first appears and rows keep
/// their relative order inside a batch, so a given file always replays as the
/// same event sequence.
pub fn group_by_invoice(rows: impl IntoIterator<Item = TransactionRow>) -> Vec<TransactionBatch> {
    let mut positions = HashMap::<InvoiceId, usize>::new();
    let mut batches = Vec::<TransactionBatch>::new();

    for row in rows {
        match positions.get(&row.invoice) {
            Some(&position) => batches[position].push(row),
            None => {
                positions.insert(row.invoice.clone(), batches.len());
                batches.push(TransactionBatch::new(row));
            }
        }
    }

    info!("Grouped transactions into {} invoices", batches.len());

    batches
}
