use crate::SyncError;
use std::sync::Arc;
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_providers::TxPool;

/// Reinserts transactions invalidated by a trusted-state rewind back into the pending
/// transaction pool.
#[derive(Debug, Clone)]
pub struct PoolReorgCoordinator {
    pool: Arc<dyn TxPool>,
}

impl PoolReorgCoordinator {
    /// Creates a new [`PoolReorgCoordinator`] over the provided pool.
    pub fn new(pool: Arc<dyn TxPool>) -> Self {
        Self { pool }
    }

    /// Recovers the transactions contained in batches at or beyond the first reorged batch
    /// number.
    ///
    /// The transactions are removed from the pool and reinserted flagged as work in progress, so
    /// a sequencer restarting after the rewind is responsible for promoting them back to pending
    /// instead of immediately re-including transactions whose validity context just changed.
    pub async fn reorg_from(
        &self,
        tx: &DatabaseTransaction,
        batch_number: u64,
    ) -> Result<usize, SyncError> {
        let transactions =
            tx.get_transactions_above_batch(batch_number.saturating_sub(1)).await?;
        if transactions.is_empty() {
            return Ok(0);
        }

        tracing::info!(
            target: "zkevm::sync",
            batch_number,
            count = transactions.len(),
            "Moving reorged transactions back to the pool."
        );

        let hashes: Vec<_> = transactions.iter().map(|transaction| transaction.hash).collect();
        self.pool.delete_transactions(&hashes).await?;
        let count = transactions.len();
        for transaction in transactions {
            self.pool.store_transaction(transaction, true).await?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::B256;
    use zkevm_db::test_utils::setup_test_db;
    use zkevm_node_primitives::PooledTransaction;
    use zkevm_node_providers::test_utils::RecordingPool;

    #[tokio::test]
    async fn test_reorged_transactions_are_requeued_as_wip() {
        let db = setup_test_db().await;
        for (batch_number, byte) in [(41, 1u8), (42, 2), (43, 3)] {
            db.insert_l2_transaction(PooledTransaction {
                hash: B256::with_last_byte(byte),
                batch_number,
                encoded: vec![byte].into(),
            })
            .await
            .unwrap();
        }

        let pool = Arc::new(RecordingPool::default());
        let coordinator = PoolReorgCoordinator::new(pool.clone());

        let tx = db.tx().await.unwrap();
        let count = coordinator.reorg_from(&tx, 42).await.unwrap();
        tx.commit().await.unwrap();

        // Only the transactions of batches 42 and beyond are recovered.
        assert_eq!(2, count);
        assert_eq!(
            vec![B256::with_last_byte(2), B256::with_last_byte(3)],
            pool.deleted()
        );
        let stored = pool.stored();
        assert_eq!(2, stored.len());
        assert!(stored.iter().all(|(_, wip)| *wip));
    }
}
