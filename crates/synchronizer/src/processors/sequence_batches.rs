use super::FORKS_LEGACY;
use crate::{
    reconcile::{BatchReconciler, ReconcileRules},
    L1EventProcessor, ProcessOutcome, SyncError,
};
use zkevm_db::DatabaseTransaction;
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// Reconciles sequences committed under the pre-etrog fork generations.
///
/// These forks declare the global exit root and the batch timestamp explicitly on the sequence
/// event; forced sequences consume the forced batch queue in strict order.
#[derive(Debug)]
pub struct SequenceBatchesProcessor {
    reconciler: BatchReconciler,
}

impl SequenceBatchesProcessor {
    /// Creates a new [`SequenceBatchesProcessor`] over the provided reconciler.
    pub(crate) const fn new(reconciler: BatchReconciler) -> Self {
        Self { reconciler }
    }
}

#[async_trait::async_trait]
impl L1EventProcessor for SequenceBatchesProcessor {
    fn name(&self) -> &'static str {
        "sequence_batches_legacy"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_LEGACY
    }

    fn supported_events(&self) -> &'static [EventKind] {
        &[EventKind::SequenceBatches, EventKind::SequenceForcedBatches]
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let (L1Event::SequenceBatches(batches) | L1Event::SequenceForcedBatches(batches)) = event
        else {
            return Err(SyncError::InvalidParams(format!(
                "{} processor received a {} payload",
                self.name(),
                order.kind
            )));
        };

        self.reconciler.process_sequence(tx, block, batches, ReconcileRules::legacy()).await?;
        Ok(ProcessOutcome::Processed)
    }
}
