use crate::SyncError;
use zkevm_db::DatabaseTransaction;
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// The outcome of processing a single event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The event was processed; the caller continues with the next event.
    Processed,
    /// The event durably rewound state behind the node's back; the caller must commit the
    /// transaction, discard in-memory progress and restart synchronization from the provided
    /// batch number. This is a deliberate instruction, not a failure.
    MustResync {
        /// The first batch number to resynchronize from.
        from_batch_number: u64,
    },
}

/// A handler implementing the reconciliation rules of one or more event kinds for one or more
/// protocol versions.
///
/// Processors share the unit of work's database transaction and never commit on their own.
#[async_trait::async_trait]
pub trait L1EventProcessor: Send + Sync + std::fmt::Debug {
    /// The display name of the processor, used for registry diagnostics and logging.
    fn name(&self) -> &'static str;

    /// The fork ids the processor implements the rules for. [`ForkId::WILDCARD`] applies to all
    /// forks for which no more specific processor is registered.
    fn supported_forks(&self) -> &'static [ForkId];

    /// The event kinds the processor handles.
    fn supported_events(&self) -> &'static [EventKind];

    /// Processes a single event within the shared database transaction.
    async fn process(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError>;
}
