use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Transactions file [{path}] is unreadable: {reason}")]
    SourceUnreadable {
        path: String,
        reason: String
    },
    #[error("Cannot sample [{requested}] invoices, only [{available}] distinct invoices are present")]
    InsufficientInvoices {
        requested: usize,
        available: usize
    }
}

impl SourceError {
    pub fn unreadable(path: &Path, reason: impl Display) -> Self {
        Self::SourceUnreadable {
            path: path.display().to_string(),
            reason: reason.to_string()
        }
    }

    pub fn missing_columns(path: &Path, columns: &[&str]) -> Self {
        Self::unreadable(path, format!("missing required columns [{}]", columns.join(", ")))
    }

    pub fn insufficient_invoices(requested: usize, available: usize) -> Self {
        Self::InsufficientInvoices { requested, available }
    }
}
