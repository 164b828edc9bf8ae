use crate::models::TransactionRow;
use crate::types::InvoiceId;

/// All rows sharing one invoice id, in original file order.
///
/// A batch is always created from its first row, so it is never empty and
/// every row it holds carries the batch invoice id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBatch {
    invoice: InvoiceId,
    rows: Vec<TransactionRow>
}

impl TransactionBatch {
    pub fn new(first: TransactionRow) -> Self {
        Self {
            invoice: first.invoice.clone(),
            rows: vec![first]
        }
    }

    /// Appends a row of the batch invoice. Callers route rows by invoice id
    /// before pushing.
    pub fn push(&mut self, row: TransactionRow) {
        debug_assert_eq!(row.invoice, self.invoice);

        self.rows.push(row);
    }

    pub fn invoice(&self) -> &str {
        &self.invoice
    }

    pub fn rows(&self) -> &[TransactionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
