mod errors;
mod grouping;
mod replay_engine;
mod runner;

pub use errors::ReplayError;
pub use grouping::group_by_invoice;
pub use replay_engine::{ReplayEngine, ReplaySummary, DEFAULT_TABLE};
pub use runner::Runner;
