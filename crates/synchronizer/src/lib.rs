//! The L1-event synchronization and batch reconciliation engine of the zkEVM rollup node.
//!
//! The engine consumes the ordered stream of events emitted by the L1 settlement contracts and
//! reconciles them against the locally derived trusted state, so that the node's batch history
//! always matches what is irreversibly committed on L1.

pub use auditor::ConsistencyAuditor;
mod auditor;

pub use bookkeeping::{FlushTracker, TrustedSyncBookkeeping};
mod bookkeeping;

pub use config::SynchronizerConfig;
mod config;

pub use error::SyncError;
mod error;

mod metrics;

pub use pool_reorg::PoolReorgCoordinator;
mod pool_reorg;

pub use processor::{L1EventProcessor, ProcessOutcome};
mod processor;

pub mod processors;

mod reconcile;

pub use registry::ProcessorRegistry;
mod registry;

use crate::metrics::{MetricsHandler, Task};
use std::{sync::Arc, time::Instant};
use zkevm_db::{Database, DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// The outcome of processing one L1 block's worth of events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// The block was processed and committed.
    Processed,
    /// The block durably rewound trusted state; the caller must discard in-memory progress and
    /// restart synchronization from the provided batch number.
    MustResync {
        /// The first batch number to resynchronize from.
        from_batch_number: u64,
    },
}

/// The synchronizer drives one unit of work at a time: an L1 block together with its events, in
/// position order, inside a single database transaction.
///
/// Any failure rolls back the whole unit and propagates to the caller, which retries the same
/// block from scratch; the transaction boundary guarantees no partial commitment is ever
/// visible.
#[derive(Debug)]
pub struct Synchronizer {
    /// A reference to the database used to persist the reconciled state.
    database: Arc<Database>,
    /// The dispatch table routing events to their versioned processors.
    registry: ProcessorRegistry,
    /// The metrics handler.
    metrics: MetricsHandler,
}

impl Synchronizer {
    /// Creates a new [`Synchronizer`] over the provided database and registry.
    pub fn new(database: Arc<Database>, registry: ProcessorRegistry) -> Self {
        Self { database, registry, metrics: MetricsHandler::default() }
    }

    /// Processes one L1 block's worth of events inside a single transaction.
    ///
    /// This is the engine's single scoped-transaction path: the unit either fully commits or
    /// fully rolls back, including the must-resync case, whose rewind is committed before the
    /// signal is surfaced.
    pub async fn process_block(
        &self,
        block: &L1BlockWithEvents,
    ) -> Result<BlockOutcome, SyncError> {
        let start = Instant::now();
        let tx = self.database.tx().await?;

        let outcome = match self.process_block_events(&tx, block).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    target: "zkevm::sync",
                    block_number = block.number,
                    %err,
                    "Failed to process L1 block, rolling back."
                );
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(target: "zkevm::sync", %rollback_err, "Failed to roll back transaction.");
                }
                return Err(err);
            }
        };

        tx.commit().await?;
        if let Some(metric) = self.metrics.get(Task::L1Block) {
            metric.task_duration.record(start.elapsed().as_secs_f64());
        }
        Ok(outcome)
    }

    /// Dispatches the block's events in their declared position order.
    async fn process_block_events(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
    ) -> Result<BlockOutcome, SyncError> {
        tx.insert_l1_block(block).await?;

        for (position, event) in block.events.iter().enumerate() {
            let order = EventOrder { kind: event.kind(), position };
            let fork_id = self.resolve_fork_id(tx, event).await?;
            match self.registry.process(fork_id, tx, block, order, event).await? {
                ProcessOutcome::Processed => {}
                ProcessOutcome::MustResync { from_batch_number } => {
                    // The rewind below the resync point is already applied within this
                    // transaction; the caller commits it and reprocesses the remaining events
                    // once synchronization restarts.
                    return Ok(BlockOutcome::MustResync { from_batch_number });
                }
            }
        }

        Ok(BlockOutcome::Processed)
    }

    /// Resolves the fork id active for the event's target batch number. Events that do not
    /// target a batch resolve against the last known local batch, and an empty fork interval
    /// table resolves to the wildcard fork.
    async fn resolve_fork_id(
        &self,
        tx: &DatabaseTransaction,
        event: &L1Event,
    ) -> Result<ForkId, SyncError> {
        let batch_number = match event.target_batch_number() {
            Some(batch_number) => batch_number,
            None => tx.get_last_batch_number().await?,
        };
        Ok(tx
            .get_fork_id_by_batch_number(batch_number)
            .await?
            .unwrap_or(ForkId::WILDCARD))
    }
}
