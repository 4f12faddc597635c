use crate::{L1EventProcessor, ProcessOutcome, SyncError};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};
use zkevm_node_providers::TrustedBlockSource;

/// A processor decorator comparing locally synced L2 blocks against a trusted reference node.
///
/// After delegating to the wrapped processor, the auditor samples one L2 block number and
/// compares the locally stored hash against the reference node's. A mismatch is logged as an
/// error but never alters the outcome of the wrapped processor: the check is an observability
/// signal, not a consensus decision, and it never rolls back the transaction.
#[derive(Debug)]
pub struct ConsistencyAuditor {
    /// The wrapped processor.
    inner: Arc<dyn L1EventProcessor>,
    /// The trusted reference node.
    source: Arc<dyn TrustedBlockSource>,
    /// The sampling modulus. Zero checks every block, `n > 0` checks block numbers that are
    /// multiples of `n`.
    modulus: u64,
    /// The next block number candidate to check. Advances monotonically; a block is never
    /// checked twice.
    next_to_check: AtomicU64,
}

impl ConsistencyAuditor {
    /// Creates a new [`ConsistencyAuditor`] wrapping the provided processor.
    pub fn new(
        inner: Arc<dyn L1EventProcessor>,
        source: Arc<dyn TrustedBlockSource>,
        modulus: u64,
    ) -> Self {
        Self { inner, source, modulus, next_to_check: AtomicU64::new(0) }
    }

    /// Returns the next sampling boundary at or after the cursor.
    fn sample_target(&self) -> u64 {
        let cursor = self.next_to_check.load(Ordering::Relaxed);
        if self.modulus > 0 {
            cursor.div_ceil(self.modulus) * self.modulus
        } else {
            cursor
        }
    }

    /// Runs one sampled consistency check. Failures are logged and swallowed.
    async fn audit(&self, tx: &DatabaseTransaction) {
        let last_local = match tx.get_last_l2_block_number().await {
            Ok(number) => number,
            Err(err) => {
                tracing::warn!(target: "zkevm::sync", ?err, "Consistency check could not read local head.");
                return;
            }
        };

        let target = self.sample_target();
        if target > last_local {
            return;
        }

        let local = match tx.get_l2_block_hash(target).await {
            Ok(Some(hash)) => hash,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(target: "zkevm::sync", ?err, block_number = target, "Consistency check could not read local block.");
                return;
            }
        };
        let trusted = match self.source.block_hash_by_number(target).await {
            Ok(Some(hash)) => hash,
            // The reference node does not know the block yet; retry the same target later.
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(target: "zkevm::sync", ?err, block_number = target, "Consistency check could not reach the reference node.");
                return;
            }
        };

        if local == trusted {
            tracing::trace!(target: "zkevm::sync", block_number = target, "L2 block consistent with reference node.");
        } else {
            tracing::error!(
                target: "zkevm::sync",
                block_number = target,
                %local,
                %trusted,
                "L2 block hash differs from the trusted reference node."
            );
        }
        self.next_to_check.store(target + 1, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl L1EventProcessor for ConsistencyAuditor {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn supported_forks(&self) -> &'static [ForkId] {
        self.inner.supported_forks()
    }

    fn supported_events(&self) -> &'static [EventKind] {
        self.inner.supported_events()
    }

    async fn process(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let outcome = self.inner.process(tx, block, order, event).await?;
        self.audit(tx).await;
        Ok(outcome)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::B256;
    use zkevm_db::test_utils::setup_test_db;
    use zkevm_node_providers::test_utils::MapBlockSource;

    #[derive(Debug)]
    struct NoopProcessor;

    #[async_trait::async_trait]
    impl L1EventProcessor for NoopProcessor {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn supported_forks(&self) -> &'static [ForkId] {
            &[ForkId::WILDCARD]
        }

        fn supported_events(&self) -> &'static [EventKind] {
            &[EventKind::SequenceBatches]
        }

        async fn process(
            &self,
            _tx: &DatabaseTransaction,
            _block: &L1BlockWithEvents,
            _order: EventOrder,
            _event: &L1Event,
        ) -> Result<ProcessOutcome, SyncError> {
            Ok(ProcessOutcome::Processed)
        }
    }

    #[tokio::test]
    async fn test_auditor_advances_on_sampling_boundaries() {
        let db = setup_test_db().await;
        for number in 0..=10u64 {
            db.insert_l2_block(number, B256::with_last_byte(number as u8)).await.unwrap();
        }

        let source = Arc::new(MapBlockSource::default());
        for number in 0..=10u64 {
            source.set_block(number, B256::with_last_byte(number as u8));
        }

        let auditor = ConsistencyAuditor::new(Arc::new(NoopProcessor), source, 5);

        let tx = db.tx().await.unwrap();
        // First check lands on boundary 0, then 5, then 10; never re-checks.
        auditor.audit(&tx).await;
        assert_eq!(1, auditor.next_to_check.load(Ordering::Relaxed));
        auditor.audit(&tx).await;
        assert_eq!(6, auditor.next_to_check.load(Ordering::Relaxed));
        auditor.audit(&tx).await;
        assert_eq!(11, auditor.next_to_check.load(Ordering::Relaxed));
        // Boundary 15 is beyond the local head, the cursor holds.
        auditor.audit(&tx).await;
        assert_eq!(11, auditor.next_to_check.load(Ordering::Relaxed));
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_auditor_mismatch_does_not_error() {
        let db = setup_test_db().await;
        db.insert_l2_block(0, B256::with_last_byte(1)).await.unwrap();

        let source = Arc::new(MapBlockSource::default());
        source.set_block(0, B256::with_last_byte(2));

        let auditor = ConsistencyAuditor::new(Arc::new(NoopProcessor), source, 0);

        // The hash mismatch is logged, the cursor still advances and no error surfaces.
        let tx = db.tx().await.unwrap();
        auditor.audit(&tx).await;
        assert_eq!(1, auditor.next_to_check.load(Ordering::Relaxed));
        tx.rollback().await.unwrap();
    }
}
