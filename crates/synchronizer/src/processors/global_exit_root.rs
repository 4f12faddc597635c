use super::FORKS_LEGACY;
use crate::{L1EventProcessor, ProcessOutcome, SyncError};
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// Stores global exit root updates emitted by the pre-etrog exit root contract.
///
/// Etrog and later forks replace these updates with L1 info tree leaves, handled by
/// [`super::L1InfoTreeProcessor`].
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct GlobalExitRootProcessor;

#[async_trait::async_trait]
impl L1EventProcessor for GlobalExitRootProcessor {
    fn name(&self) -> &'static str {
        "global_exit_root"
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        FORKS_LEGACY
    }

    fn supported_events(&self) -> &'static [EventKind] {
        &[EventKind::GlobalExitRootUpdate]
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        _block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let L1Event::GlobalExitRootUpdate(update) = event else {
            return Err(SyncError::InvalidParams(format!(
                "{} processor received a {} payload",
                self.name(),
                order.kind
            )));
        };

        tx.insert_exit_root(update.clone()).await?;
        Ok(ProcessOutcome::Processed)
    }
}
