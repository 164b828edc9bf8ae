mod errors;
mod reader;
mod sampling;

pub use errors::SourceError;
pub use reader::load;
pub use sampling::{distinct_invoices, sample_by_invoice};
