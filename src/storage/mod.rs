mod dialect;
mod errors;
mod sql_sink;

use crate::models::columns::INVOICE_COLUMN;
use crate::models::TransactionBatch;
use crate::types::InvoiceId;

pub use dialect::validate_table_name;
pub use errors::SinkError;
pub use sql_sink::SqlSink;

/// Columns of an existing target table, in table order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TableStructure {
    pub name: String,
    pub columns: Vec<String>
}

/// Selects every target row whose `column` equals `invoice`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeletePredicate {
    pub column: &'static str,
    pub invoice: InvoiceId
}

impl DeletePredicate {
    pub fn invoice(invoice: &str) -> Self {
        Self {
            column: INVOICE_COLUMN,
            invoice: invoice.to_string()
        }
    }
}

/// The database a replay writes to. Every call reports the affected row count.
pub trait Sink {
    async fn insert(&mut self, table: &str, batch: &TransactionBatch) -> Result<u64, SinkError>;
    async fn delete(&mut self, table: &str, predicate: &DeletePredicate) -> Result<u64, SinkError>;
    async fn lookup_table(&mut self, table: &str) -> Result<Option<TableStructure>, SinkError>;
}
