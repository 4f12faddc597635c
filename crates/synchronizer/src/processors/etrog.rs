use super::FORKS_ETROG;
use crate::{
    reconcile::{BatchReconciler, ReconcileRules},
    L1EventProcessor, ProcessOutcome, SyncError,
};
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{
    EventKind, EventOrder, ForcedBatchData, ForkId, L1BlockWithEvents, L1Event,
    SequencedBatchEnvelope, UpdateEtrogSequenceData,
};

/// Reconciles sequences committed under the etrog fork generation.
///
/// Etrog batches resolve their global exit root from the L1 info tree and anchor forced batches
/// to an L1 block hash. The generation also introduces the injected batch sequenced at the
/// upgrade itself, together with an update event replacing the injected batch data while the
/// network recovers from an emergency state.
#[derive(Debug)]
pub struct EtrogSequenceBatchesProcessor {
    reconciler: BatchReconciler,
}

impl EtrogSequenceBatchesProcessor {
    /// Creates a new [`EtrogSequenceBatchesProcessor`] over the provided reconciler.
    pub(crate) const fn new(reconciler: BatchReconciler) -> Self {
        Self { reconciler }
    }

    /// Replaces the injected sequence with the updated L1-declared data: the previously derived
    /// state from the injected batch onwards is discarded and rederived.
    async fn update_injected_sequence(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        data: &UpdateEtrogSequenceData,
    ) -> Result<(), SyncError> {
        tracing::info!(
            target: "zkevm::sync",
            batch_number = data.batch_number,
            "Updating injected etrog sequence from L1 data."
        );

        let envelope = SequencedBatchEnvelope {
            batch_number: data.batch_number,
            l1_tx_hash: data.l1_tx_hash,
            sequencer: data.sequencer,
            coinbase: data.sequencer,
            transactions: data.transactions.clone(),
            global_exit_root: data.global_exit_root,
            timestamp_limit: data.timestamp,
            l1_info_root: None,
            l1_info_leaf_indices: vec![],
            forced: Some(ForcedBatchData {
                global_exit_root: data.global_exit_root,
                timestamp: data.timestamp,
                block_hash: data.block_hash,
            }),
        };

        tx.reset_trusted_state_gt(data.batch_number.saturating_sub(1)).await?;
        self.reconciler.process_sequence(tx, block, &[envelope], ReconcileRules::etrog()).await
    }
}

#[async_trait::async_trait]
impl L1EventProcessor for EtrogSequenceBatchesProcessor {
    fn name(&self) -> &'static str {
        "sequence_batches_etrog"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_ETROG
    }

    fn supported_events(&self) -> &'static [EventKind] {
        &[
            EventKind::SequenceBatches,
            EventKind::InitialSequenceBatches,
            EventKind::UpdateEtrogSequence,
        ]
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        match event {
            L1Event::SequenceBatches(batches) | L1Event::InitialSequenceBatches(batches) => {
                self.reconciler
                    .process_sequence(tx, block, batches, ReconcileRules::etrog())
                    .await?;
            }
            L1Event::UpdateEtrogSequence(data) => {
                self.update_injected_sequence(tx, block, data).await?;
            }
            _ => {
                return Err(SyncError::InvalidParams(format!(
                    "{} processor received a {} payload",
                    self.name(),
                    order.kind
                )))
            }
        }
        Ok(ProcessOutcome::Processed)
    }
}
