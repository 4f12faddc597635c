use crate::L1Event;
use alloy_primitives::B256;

/// Information about an L1 block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

impl BlockInfo {
    /// Returns a new instance of [`BlockInfo`].
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

impl std::fmt::Display for BlockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockInfo {{ number: {}, hash: {} }}", self.number, self.hash)
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for BlockInfo {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let number = u.int_in_range(0..=u32::MAX)?;
        let hash = B256::arbitrary(u)?;
        Ok(Self { number: number as u64, hash })
    }
}

/// One unit of work for the synchronizer: an L1 block together with the rollup
/// events it emitted, in emission order.
///
/// The L1 client collaborator guarantees in-order, gap-free delivery of these
/// blocks, and in-order events within a block. Event positions are the indices
/// into [`Self::events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1BlockWithEvents {
    /// The L1 block number.
    pub number: u64,
    /// The L1 block hash.
    pub hash: B256,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The L1 block timestamp.
    pub timestamp: u64,
    /// The unix timestamp at which the block was received by the L1 client.
    pub received_at: u64,
    /// The rollup events emitted in this block, in emission order.
    pub events: Vec<L1Event>,
}

impl L1BlockWithEvents {
    /// Returns the [`BlockInfo`] for this block.
    pub const fn block_info(&self) -> BlockInfo {
        BlockInfo { number: self.number, hash: self.hash }
    }
}
