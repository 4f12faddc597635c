use super::FORKS_ELDERBERRY;
use crate::{
    reconcile::{BatchReconciler, ReconcileRules},
    L1EventProcessor, ProcessOutcome, SyncError,
};
use zkevm_db::DatabaseTransaction;
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// Reconciles sequences committed under the elderberry fork generations.
///
/// Elderberry keeps the etrog input resolution and re-dispatches to the shared reconciler with
/// its own timing rule: the declared maximum sequence timestamp may equal the trusted batch
/// timestamp.
#[derive(Debug)]
pub struct ElderberrySequenceBatchesProcessor {
    reconciler: BatchReconciler,
}

impl ElderberrySequenceBatchesProcessor {
    /// Creates a new [`ElderberrySequenceBatchesProcessor`] over the provided reconciler.
    pub(crate) const fn new(reconciler: BatchReconciler) -> Self {
        Self { reconciler }
    }
}

#[async_trait::async_trait]
impl L1EventProcessor for ElderberrySequenceBatchesProcessor {
    fn name(&self) -> &'static str {
        "sequence_batches_elderberry"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_ELDERBERRY
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

        self.reconciler.process_sequence(tx, block, batches, ReconcileRules::elderberry()).await?;
        Ok(ProcessOutcome::Processed)
    }
}
