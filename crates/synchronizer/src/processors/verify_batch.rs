use super::FORKS_WILDCARD;
use crate::{L1EventProcessor, ProcessOutcome, SyncError};
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{
    EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event, VerifiedBatch,
};

/// Records batch verification proofs accepted on L1, consumed downstream by the proof pipeline.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct VerifyBatchProcessor;

#[async_trait::async_trait]
impl L1EventProcessor for VerifyBatchProcessor {
    fn name(&self) -> &'static str {
        "verify_batch"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_WILDCARD
    }

    fn supported_events(&self) -> &'static [EventKind] {
        &[EventKind::VerifyBatch, EventKind::TrustedVerifyBatch]
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        _block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let (data, is_trusted) = match event {
            L1Event::VerifyBatch(data) => (data, false),
            L1Event::TrustedVerifyBatch(data) => (data, true),
            _ => {
                return Err(SyncError::InvalidParams(format!(
                    "{} processor received a {} payload",
                    self.name(),
                    order.kind
                )))
            }
        };

        tracing::info!(
            target: "zkevm::sync",
            batch_number = data.batch_number,
            is_trusted,
            "Recording batch verification."
        );
        tx.upsert_verified_batch(VerifiedBatch {
            block_number: data.block_number,
            batch_number: data.batch_number,
            aggregator: data.aggregator,
            state_root: data.state_root,
            l1_tx_hash: data.l1_tx_hash,
            is_trusted,
        })
        .await?;
        Ok(ProcessOutcome::Processed)
    }
}
