use super::FORKS_WILDCARD;
use crate::{L1EventProcessor, ProcessOutcome, SyncError};
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// Enqueues batches forced directly on L1 for later consumption by a forced sequence.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct ForcedBatchesProcessor;

#[async_trait::async_trait]
impl L1EventProcessor for ForcedBatchesProcessor {
    fn name(&self) -> &'static str {
        "forced_batches"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_WILDCARD
    }

    fn supported_events(&self) -> &'static [EventKind] {
        &[EventKind::ForcedBatches]
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        _block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let L1Event::ForcedBatches(forced) = event else {
            return Err(SyncError::InvalidParams(format!(
                "{} processor received a {} payload",
                self.name(),
                order.kind
            )));
        };
        if forced.is_empty() {
            return Err(SyncError::InvalidParams(
                "forced batches event carries no entries".to_owned(),
            ));
        }

        for forced_batch in forced {
            tracing::info!(
                target: "zkevm::sync",
                forced_batch_number = forced_batch.forced_batch_number,
                "Queueing forced batch."
            );
            tx.insert_forced_batch(forced_batch.clone()).await?;
        }
        Ok(ProcessOutcome::Processed)
    }
}
