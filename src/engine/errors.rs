use thiserror::Error;

use crate::models::TransactionBatch;
use crate::storage::SinkError;
use crate::types::InvoiceId;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Target table [{table}] does not exist")]
    TargetTableMissing {
        table: String
    },
    #[error("Could not look up target table [{table}]: {source}")]
    LookupFailed {
        table: String,
        #[source]
        source: SinkError
    },
    #[error("Sink operation for invoice [{invoice}] failed after [{completed}] replayed invoices: {source}")]
    SinkOperationFailed {
        invoice: InvoiceId,
        completed: usize,
        #[source]
        source: SinkError
    }
}

impl ReplayError {
    pub fn target_table_missing(table: &str) -> Self {
        Self::TargetTableMissing { table: table.to_string() }
    }

    pub fn lookup_failed(table: &str, source: SinkError) -> Self {
        Self::LookupFailed { table: table.to_string(), source }
    }

    pub fn sink_operation_failed(batch: &TransactionBatch, completed: usize, source: SinkError) -> Self {
        Self::SinkOperationFailed {
            invoice: batch.invoice().to_string(),
            completed,
            source
        }
    }
}
