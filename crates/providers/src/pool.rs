use alloy_primitives::B256;
use zkevm_node_primitives::PooledTransaction;

/// The error type for the pending-transaction pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The pool rejected the transaction.
    #[error("pool rejected transaction {0}")]
    Rejected(B256),
    /// The pool could not be reached.
    #[error("pool transport error: {0}")]
    Transport(String),
}

/// The pending-transaction pool collaborator.
///
/// The pool owns transaction admission; the synchronizer only touches it when a trusted-state
/// rewind invalidates transactions that were already included in discarded batches.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait TxPool: Send + Sync + std::fmt::Debug {
    /// Removes the transactions with the provided hashes from the pool.
    async fn delete_transactions(&self, hashes: &[B256]) -> Result<(), PoolError>;

    /// Stores a transaction in the pool. When `wip` is set the transaction is not eligible for
    /// selection until the sequencer promotes it back to pending.
    async fn store_transaction(
        &self,
        transaction: PooledTransaction,
        wip: bool,
    ) -> Result<(), PoolError>;
}
