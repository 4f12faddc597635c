use super::FORKS_WILDCARD;
use crate::{L1EventProcessor, ProcessOutcome, SyncError};
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{
    EventKind, EventOrder, ForkId, ForkIdInterval, L1BlockWithEvents, L1Event,
};

/// Ingests fork id updates, extending the fork interval table.
///
/// A fork update whose effective batch number lies in the past of the node's own batch history
/// means the fork version history was misjudged: on a permissionless follower all trusted state
/// from that point is invalidated and the caller is instructed to resynchronize.
#[derive(Debug)]
pub struct ForkIdProcessor {
    is_trusted_sequencer: bool,
}

impl ForkIdProcessor {
    /// Creates a new [`ForkIdProcessor`].
    pub const fn new(is_trusted_sequencer: bool) -> Self {
        Self { is_trusted_sequencer }
    }
}

#[async_trait::async_trait]
impl L1EventProcessor for ForkIdProcessor {
    fn name(&self) -> &'static str {
        "fork_id"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_WILDCARD
    }

    fn supported_events(&self) -> &'static [EventKind] {
        &[EventKind::ForkIdUpdate]
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        _block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let L1Event::ForkIdUpdate(update) = event else {
            return Err(SyncError::InvalidParams(format!(
                "{} processor received a {} payload",
                self.name(),
                order.kind
            )));
        };

        // The new fork applies from the batch after the last one sequenced under the previous
        // fork, unbounded until a later update closes it.
        let candidate = ForkIdInterval {
            from_batch_number: update.effective_from_batch_number + 1,
            to_batch_number: u64::MAX,
            fork_id: update.new_fork_id,
            version: update.version.clone(),
            block_number: update.block_number,
        };

        let intervals = tx.get_fork_id_intervals().await?;
        if let Some(existing) = intervals.iter().find(|i| i.fork_id == candidate.fork_id) {
            if *existing == candidate {
                // Harmless retry of an already ingested update.
                tracing::debug!(target: "zkevm::sync", fork_id = %candidate.fork_id, "Duplicate fork id update, ignoring.");
                return Ok(ProcessOutcome::Processed);
            }
            // Two different definitions for the same fork id is unrecoverable ambiguity.
            return Err(SyncError::ForkIdConflict(candidate.fork_id));
        }
        if intervals.iter().any(|i| candidate.fork_id < i.fork_id) {
            return Err(SyncError::ForkIdConflict(candidate.fork_id));
        }

        tracing::info!(
            target: "zkevm::sync",
            fork_id = %candidate.fork_id,
            from_batch_number = candidate.from_batch_number,
            version = %candidate.version,
            "Storing new fork id interval."
        );
        tx.insert_fork_id_interval(candidate.clone()).await?;

        // No rewind needed when the fork only affects future batches, or when this node is the
        // trusted sequencer and is the source of the batch history itself.
        let last_batch_number = tx.get_last_batch_number().await?;
        if candidate.from_batch_number > last_batch_number || self.is_trusted_sequencer {
            return Ok(ProcessOutcome::Processed);
        }

        // The fork version history was misjudged for already derived batches: invalidate them
        // and instruct the caller to restart synchronization from the fork boundary once the
        // rewind is durably committed.
        tracing::warn!(
            target: "zkevm::sync",
            fork_id = %candidate.fork_id,
            from_batch_number = candidate.from_batch_number,
            last_batch_number,
            "Fork id update affects already synchronized batches, rewinding trusted state."
        );
        tx.reset_trusted_state_gt(update.effective_from_batch_number).await?;
        Ok(ProcessOutcome::MustResync { from_batch_number: candidate.from_batch_number })
    }
}
