mod batch;
pub mod columns;
mod transaction;

pub use batch::TransactionBatch;
pub use columns::{ColumnKind, ColumnValue, COLUMNS};
pub use transaction::TransactionRow;
