use std::fmt;
use std::fmt::{Display, Formatter};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::spawn_blocking;
use tracing::{info, warn};

use crate::cli::ReplayConfig;
use crate::engine::{group_by_invoice, ReplayEngine, ReplaySummary};
use crate::models::TransactionBatch;
use crate::source;
use crate::storage::{Sink, SqlSink};

/// Phases of a single run. Transitions only move forward.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    Idle,
    Loading,
    Sampling,
    Grouping,
    Replaying,
    Done,
    Failed
}

impl Display for RunState {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{self:?}")
    }
}

/// Drives one run end to end: load, sample, group and replay.
pub struct Runner {
    config: ReplayConfig,
    state: RunState
}

impl Runner {
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            config,
            state: RunState::Idle
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs against the database named by the configured connection string.
    ///
    /// The connection is opened once up front and reused for every batch.
    pub async fn run(&mut self) -> Result<ReplaySummary> {
        let mut sink = match SqlSink::connect(&self.config.db_conn).await {
            Ok(sink) => sink,
            Err(error) => return self.finish(Err(error.into()))
        };

        let result = self.run_with_sink(&mut sink).await;

        if let Err(error) = sink.close().await {
            warn!("Database connection did not close gracefully: {error}");
        }

        result
    }

    /// Runs against an already opened sink.
    pub async fn run_with_sink<S: Sink>(&mut self, sink: &mut S) -> Result<ReplaySummary> {
        let result = self.prepare_and_replay(sink).await;
        self.finish(result)
    }

    async fn prepare_and_replay<S: Sink>(&mut self, sink: &mut S) -> Result<ReplaySummary> {
        let batches = self.prepare().await?;

        self.transition(RunState::Replaying);

        Ok(self.replay(&batches, sink).await?)
    }

    async fn prepare(&mut self) -> Result<Vec<TransactionBatch>> {
        self.transition(RunState::Loading);

        let path = self.config.data_file.clone();
        let mut rows = spawn_blocking(move || source::load(&path)).await??;

        if self.config.invoices > 0 {
            self.transition(RunState::Sampling);

            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng())
            };

            rows = source::sample_by_invoice(rows, self.config.invoices, &mut rng)?;
        }

        self.transition(RunState::Grouping);

        Ok(group_by_invoice(rows))
    }

    async fn replay<S: Sink>(&self, batches: &[TransactionBatch], sink: &mut S) -> Result<ReplaySummary> {
        let engine = ReplayEngine::new(self.config.mode, self.config.delay)
            .with_table(self.config.table.as_str());

        Ok(engine.replay(batches, sink).await?)
    }

    //NOTE: Errors are only recorded as a state here, the caller reports them.
    fn finish(&mut self, result: Result<ReplaySummary>) -> Result<ReplaySummary> {
        match &result {
            Ok(_) => self.transition(RunState::Done),
            Err(_) => self.transition(RunState::Failed)
        }

        result
    }

    fn transition(&mut self, next: RunState) {
        info!("Run state: {} -> {}", self.state, next);
        self.state = next;
    }
}
