use zkevm_db::DatabaseError;
use zkevm_node_primitives::{EventKind, ForkId};
use zkevm_node_providers::{ExecutionError, PoolError};

/// A type that represents an error that occurred in the synchronizer.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No processor is registered for the fork id and event kind. This is a fork/event coverage
    /// bug, not a retryable condition: skipping an event would desynchronize state permanently.
    #[error("no processor registered for fork {fork_id} and event {kind}")]
    CantProcessEvent {
        /// The fork id the event resolved to.
        fork_id: ForkId,
        /// The kind of the event.
        kind: EventKind,
    },
    /// The event payload does not have the shape the event stream contract guarantees.
    #[error("invalid event parameters: {0}")]
    InvalidParams(String),
    /// A sequenced batch declared itself forced but the forced batch queue is empty.
    #[error("forced batch queue empty while sequencing batch {0}")]
    ForcedBatchQueueEmpty(u64),
    /// The next queued forced batch does not match what L1 declared for the sequence entry. The
    /// queue and the L1 commitment must always agree bit for bit.
    #[error("forced batch {forced_batch_number} does not match L1 declaration: {reason}")]
    ForcedBatchMismatch {
        /// The forced batch number at the head of the queue.
        forced_batch_number: u64,
        /// The diverging fields.
        reason: String,
    },
    /// A referenced L1 info tree leaf is not known locally.
    #[error("L1 info tree leaf at index {0} not found")]
    MissingL1InfoTreeLeaf(u32),
    /// Two different definitions were received for the same fork id.
    #[error("conflicting definitions for fork id {0}")]
    ForkIdConflict(ForkId),
    /// The trusted sequencer's own state disagrees with what it committed on L1.
    #[error("trusted state desynchronized at batch {batch_number}: {reason}")]
    TrustedStateDesync {
        /// The diverging batch number.
        batch_number: u64,
        /// The diverging fields.
        reason: String,
    },
    /// An error occurred while interacting with the database.
    #[error("synchronization failed due to database error: {0}")]
    Database(#[from] DatabaseError),
    /// An error occurred while calling the deterministic execution service.
    #[error("synchronization failed due to execution error: {0}")]
    Execution(#[from] ExecutionError),
    /// An error occurred while interacting with the transaction pool.
    #[error("synchronization failed due to pool error: {0}")]
    Pool(#[from] PoolError),
}
