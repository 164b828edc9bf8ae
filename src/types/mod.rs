
use std::fmt;
use std::fmt::{Display, Formatter};

use clap::ValueEnum;

/// Invoice numbers are mostly numeric but cancellations carry a `C` prefix.
pub type InvoiceId = String;

/// The database action applied to every invoice batch.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum OperationMode {
    /// Append all rows of the invoice to the target table.
    Insert,
    /// Remove all rows of the target table matching the invoice.
    Delete
}

impl Display for OperationMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OperationMode::Insert => write!(formatter, "insert"),
            OperationMode::Delete => write!(formatter, "delete")
        }
    }
}
