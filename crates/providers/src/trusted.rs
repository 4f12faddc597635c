use alloy_primitives::B256;

/// The error type for the trusted reference RPC.
#[derive(Debug, thiserror::Error)]
pub enum TrustedRpcError {
    /// The reference node could not be reached.
    #[error("trusted rpc transport error: {0}")]
    Transport(String),
}

/// A source of L2 block hashes from a trusted reference node, consumed by the consistency
/// auditor.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait TrustedBlockSource: Send + Sync + std::fmt::Debug {
    /// Returns the hash of the L2 block with the provided number, or `None` if the reference node
    /// does not know the block yet.
    async fn block_hash_by_number(&self, number: u64) -> Result<Option<B256>, TrustedRpcError>;
}
