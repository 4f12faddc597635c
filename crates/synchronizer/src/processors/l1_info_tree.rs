use super::FORKS_WILDCARD;
use crate::{L1EventProcessor, ProcessOutcome, SyncError};
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// Stores L1 info tree leaves referenced by sequenced batches as execution context.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct L1InfoTreeProcessor;

#[async_trait::async_trait]
impl L1EventProcessor for L1InfoTreeProcessor {
    fn name(&self) -> &'static str {
        "l1_info_tree"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_WILDCARD
    }

    fn supported_events(&self) -> &'static [EventKind] {
        &[EventKind::L1InfoTreeUpdate]
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        _block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let L1Event::L1InfoTreeUpdate(leaf) = event else {
            return Err(SyncError::InvalidParams(format!(
                "{} processor received a {} payload",
                self.name(),
                order.kind
            )));
        };

        tracing::debug!(target: "zkevm::sync", leaf_index = leaf.leaf_index, "Storing L1 info tree leaf.");
        tx.insert_l1_info_tree_leaf(leaf.clone()).await?;
        Ok(ProcessOutcome::Processed)
    }
}
