use alloy_primitives::B256;

/// A leaf of the L1 info tree (etrog and later).
///
/// The tree structure itself is built by an external collaborator; only the
/// leaf data is consumed here, as execution context for sequenced batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1InfoTreeLeaf {
    /// The index of the leaf within the tree.
    pub leaf_index: u32,
    /// The global exit root recorded in the leaf.
    pub global_exit_root: B256,
    /// The mainnet exit root recorded in the leaf.
    pub mainnet_exit_root: B256,
    /// The rollup exit root recorded in the leaf.
    pub rollup_exit_root: B256,
    /// The hash of the previous L1 block.
    pub previous_block_hash: B256,
    /// The L1 timestamp of the leaf.
    pub timestamp: u64,
    /// The L1 block number the leaf was added at.
    pub block_number: u64,
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for L1InfoTreeLeaf {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(Self {
            leaf_index: u.arbitrary()?,
            global_exit_root: u.arbitrary()?,
            mainnet_exit_root: u.arbitrary()?,
            rollup_exit_root: u.arbitrary()?,
            previous_block_hash: u.arbitrary()?,
            timestamp: u.arbitrary::<u32>()? as u64,
            block_number: u.arbitrary::<u32>()? as u64,
        })
    }
}
