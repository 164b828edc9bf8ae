use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::engine::ReplayError;
use crate::models::TransactionBatch;
use crate::storage::{DeletePredicate, Sink, SinkError};
use crate::types::{InvoiceId, OperationMode};

pub const DEFAULT_TABLE: &str = "transactions";

/// Affected rows reported by the sink for one invoice.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BatchOutcome {
    pub invoice: InvoiceId,
    pub rows_affected: u64
}

/// Accumulated result of a replay, in processing order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReplaySummary {
    pub outcomes: Vec<BatchOutcome>
}

impl ReplaySummary {
    pub fn batches(&self) -> usize {
        self.outcomes.len()
    }

    pub fn rows_affected(&self) -> u64 {
        self.outcomes.iter().map(|outcome| outcome.rows_affected).sum()
    }

    pub fn affected_counts(&self) -> Vec<u64> {
        self.outcomes.iter().map(|outcome| outcome.rows_affected).collect()
    }

    fn record(&mut self, invoice: &str, rows_affected: u64) {
        self.outcomes.push(BatchOutcome {
            invoice: invoice.to_string(),
            rows_affected
        });
    }
}

/// Replays invoice batches against a sink, one operation per batch.
///
/// Batches run strictly in sequence with `delay` between consecutive
/// operations. The first sink failure aborts the replay; batches already
/// applied stay applied.
pub struct ReplayEngine {
    mode: OperationMode,
    delay: Duration,
    table: String
}

impl ReplayEngine {
    pub fn new(mode: OperationMode, delay: Duration) -> Self {
        Self {
            mode,
            delay,
            table: DEFAULT_TABLE.to_string()
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub async fn replay<S: Sink>(&self, batches: &[TransactionBatch], sink: &mut S) -> Result<ReplaySummary, ReplayError> {
        if self.mode == OperationMode::Delete {
            self.resolve_table(sink).await?;
        }

        info!("Replaying {} invoices in {} mode against [{}]...", batches.len(), self.mode, self.table);

        let mut summary = ReplaySummary::default();

        for (position, batch) in batches.iter().enumerate() {
            if position > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }

            let rows_affected = self.apply(batch, sink).await
                .map_err(|error| ReplayError::sink_operation_failed(batch, summary.batches(), error))?;

            info!("  > {rows_affected} lines affected");

            summary.record(batch.invoice(), rows_affected);
        }

        info!("DONE! {} invoices replayed, {} lines affected", summary.batches(), summary.rows_affected());
        debug!("Lines affected per invoice: {:?}", summary.affected_counts());

        Ok(summary)
    }

    async fn apply<S: Sink>(&self, batch: &TransactionBatch, sink: &mut S) -> Result<u64, SinkError> {
        match self.mode {
            OperationMode::Insert => {
                info!("  Inserting invoice [{}] with {} items...", batch.invoice(), batch.len());

                for row in batch.rows() {
                    debug!("    {row:?}");
                }

                sink.insert(&self.table, batch).await
            }
            OperationMode::Delete => {
                info!("  Deleting invoice [{}]...", batch.invoice());

                sink.delete(&self.table, &DeletePredicate::invoice(batch.invoice())).await
            }
        }
    }

    async fn resolve_table<S: Sink>(&self, sink: &mut S) -> Result<(), ReplayError> {
        let structure = sink.lookup_table(&self.table).await
            .map_err(|error| ReplayError::lookup_failed(&self.table, error))?
            .ok_or_else(|| ReplayError::target_table_missing(&self.table))?;

        debug!("Target table [{}] has columns {:?}", structure.name, structure.columns);

        Ok(())
    }
}
