use zkevm_node_primitives::{ExecutionResult, ProcessingContext};

/// The error type for the deterministic execution service.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// The executor rejected the processing context.
    #[error("executor rejected batch {batch_number}: {reason}")]
    Rejected {
        /// The rejected batch number.
        batch_number: u64,
        /// The executor's rejection reason.
        reason: String,
    },
    /// The executor could not be reached.
    #[error("executor transport error: {0}")]
    Transport(String),
}

/// The deterministic batch execution collaborator.
///
/// Given a [`ProcessingContext`] assembled from L1-declared inputs, returns the resulting state
/// root and accumulated input hash. Assumed pure: identical inputs always produce identical
/// results, which is what makes the reconciliation comparison meaningful.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait ExecutionService: Send + Sync + std::fmt::Debug {
    /// Executes the batch described by the provided context and returns the derived results.
    async fn process_batch(
        &self,
        ctx: &ProcessingContext,
    ) -> Result<ExecutionResult, ExecutionError>;
}
