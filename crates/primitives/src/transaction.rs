use alloy_primitives::{Bytes, B256};

/// An L2 transaction known to the node, keyed by the batch it was included
/// in.
///
/// Rows of this shape are written by the trusted-state follower and read back
/// by the pool reorg coordinator when a rewind invalidates the batches that
/// contained them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledTransaction {
    /// The transaction hash.
    pub hash: B256,
    /// The batch number the transaction was included in.
    pub batch_number: u64,
    /// The raw encoded transaction.
    pub encoded: Bytes,
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for PooledTransaction {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(Self {
            hash: u.arbitrary()?,
            batch_number: u.arbitrary::<u32>()? as u64,
            encoded: u.arbitrary::<Vec<u8>>()?.into(),
        })
    }
}
