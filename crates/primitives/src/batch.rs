use alloy_primitives::{Address, Bytes, B256};

/// A unit of L2 execution together with its locally derived ("trusted")
/// results.
///
/// A batch is created when it is opened, either by the local sequencer or by
/// deterministic re-derivation from L1 data, and mutated as it is closed or
/// checked. Once L1 has sequenced it, the reconciliation engine owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// The batch number.
    pub number: u64,
    /// The coinbase of the batch.
    pub coinbase: Address,
    /// The batch timestamp. Under etrog semantics this is the timestamp
    /// limit rather than an exact value.
    pub timestamp: u64,
    /// The global exit root referenced by the batch.
    pub global_exit_root: B256,
    /// The raw L2 transaction bytes of the batch.
    pub l2_data: Bytes,
    /// The state root after executing the batch.
    pub state_root: B256,
    /// The local exit root after executing the batch.
    pub local_exit_root: B256,
    /// The accumulated input hash of the batch.
    pub acc_input_hash: B256,
    /// The forced batch number this batch consumed, if any.
    pub forced_batch_number: Option<u64>,
    /// Whether the batch is still work in progress (not yet closed).
    pub wip: bool,
}

/// The L1 commitment record for a [`Batch`].
///
/// Created exactly once per batch number, after the corresponding trusted
/// batch exists. Immutable thereafter, except for the optional fields later
/// fork generations add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualBatch {
    /// The batch number.
    pub batch_number: u64,
    /// The hash of the L1 transaction that sequenced the batch.
    pub l1_tx_hash: B256,
    /// The L1 block number the batch was sequenced at.
    pub block_number: u64,
    /// The address of the sequencer that committed the batch.
    pub sequencer: Address,
    /// The L1 info root referenced by the sequence (etrog and later).
    pub l1_info_root: Option<B256>,
    /// The sequencing timestamp declared on L1 (etrog and later).
    pub timestamp_batch_etrog: Option<u64>,
}

/// A contiguous range of batches committed together on L1, consumed
/// downstream by the proof pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The first batch number of the sequence.
    pub from_batch_number: u64,
    /// The last batch number of the sequence.
    pub to_batch_number: u64,
}

/// A batch whose contents were published directly on L1, bypassing the
/// sequencer-submission path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedBatch {
    /// The forced batch number.
    pub forced_batch_number: u64,
    /// The global exit root declared with the forced batch.
    pub global_exit_root: B256,
    /// The raw L2 transaction bytes of the forced batch.
    pub raw_tx_data: Bytes,
    /// The address that forced the batch.
    pub sequencer: Address,
    /// The L1 timestamp at which the batch was forced.
    pub forced_at: u64,
    /// The L1 block number the batch was forced at.
    pub block_number: u64,
}

/// The L1-declared forced linkage of a sequenced batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedBatchData {
    /// The global exit root declared for the forced batch.
    pub global_exit_root: B256,
    /// The timestamp at which the batch was forced.
    pub timestamp: u64,
    /// The L1 block hash anchoring the forced batch.
    pub block_hash: B256,
}

/// One batch entry of a sequence event, as declared on L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedBatchEnvelope {
    /// The batch number.
    pub batch_number: u64,
    /// The hash of the L1 sequencing transaction.
    pub l1_tx_hash: B256,
    /// The address of the sequencer that committed the sequence.
    pub sequencer: Address,
    /// The coinbase declared for the batch.
    pub coinbase: Address,
    /// The raw L2 transaction bytes declared for the batch.
    pub transactions: Bytes,
    /// The global exit root declared for the batch. Zero under etrog
    /// semantics, where the root is resolved from the L1 info tree instead.
    pub global_exit_root: B256,
    /// The batch timestamp (legacy) or maximum sequence timestamp (etrog and
    /// later).
    pub timestamp_limit: u64,
    /// The L1 info root declared with the sequence (etrog and later).
    pub l1_info_root: Option<B256>,
    /// The L1 info tree leaf indices referenced by the batch's L2 data,
    /// pre-extracted by the L1 client collaborator.
    pub l1_info_leaf_indices: Vec<u32>,
    /// The forced linkage, when the entry consumes a forced batch.
    pub forced: Option<ForcedBatchData>,
}

/// An audit record of a detected divergence between locally derived state and
/// the state implied by L1 commitments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedReorg {
    /// The batch number at which the divergence was detected.
    pub batch_number: u64,
    /// A human readable description of the diverging fields.
    pub reason: String,
}

/// The record of a batch verification proof accepted on L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedBatch {
    /// The L1 block number the verification was emitted at.
    pub block_number: u64,
    /// The verified batch number.
    pub batch_number: u64,
    /// The aggregator that submitted the proof.
    pub aggregator: Address,
    /// The state root asserted by the proof.
    pub state_root: B256,
    /// The hash of the L1 verification transaction.
    pub l1_tx_hash: B256,
    /// Whether the proof was accepted by the trusted aggregator path.
    pub is_trusted: bool,
}

#[cfg(feature = "arbitrary")]
mod arbitrary_impl {
    use super::*;

    impl arbitrary::Arbitrary<'_> for ForcedBatch {
        fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
            Ok(Self {
                forced_batch_number: u.arbitrary::<u32>()? as u64,
                global_exit_root: u.arbitrary()?,
                raw_tx_data: u.arbitrary::<Vec<u8>>()?.into(),
                sequencer: u.arbitrary()?,
                forced_at: u.arbitrary::<u32>()? as u64,
                block_number: u.arbitrary::<u32>()? as u64,
            })
        }
    }

    impl arbitrary::Arbitrary<'_> for SequencedBatchEnvelope {
        fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
            Ok(Self {
                batch_number: u.arbitrary::<u32>()? as u64,
                l1_tx_hash: u.arbitrary()?,
                sequencer: u.arbitrary()?,
                coinbase: u.arbitrary()?,
                transactions: u.arbitrary::<Vec<u8>>()?.into(),
                global_exit_root: u.arbitrary()?,
                timestamp_limit: u.arbitrary::<u32>()? as u64,
                l1_info_root: u.arbitrary::<bool>()?.then_some(u.arbitrary()?),
                l1_info_leaf_indices: u.arbitrary()?,
                forced: None,
            })
        }
    }

    impl arbitrary::Arbitrary<'_> for VirtualBatch {
        fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
            Ok(Self {
                batch_number: u.arbitrary::<u32>()? as u64,
                l1_tx_hash: u.arbitrary()?,
                block_number: u.arbitrary::<u32>()? as u64,
                sequencer: u.arbitrary()?,
                l1_info_root: u.arbitrary::<bool>()?.then_some(u.arbitrary()?),
                timestamp_batch_etrog: u
                    .arbitrary::<bool>()?
                    .then_some(u.arbitrary::<u32>()? as u64),
            })
        }
    }
}
