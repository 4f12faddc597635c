use crate::{ForcedBatch, ForkId, L1InfoTreeLeaf, SequencedBatchEnvelope};
use alloy_primitives::{Address, Bytes, B256};

/// The closed set of rollup event kinds emitted by the L1 settlement
/// contracts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A new sequence of batches was committed.
    SequenceBatches,
    /// One or more batches were forced directly on L1.
    ForcedBatches,
    /// A sequence consuming previously forced batches was committed.
    SequenceForcedBatches,
    /// The active fork id changes at a future batch number.
    ForkIdUpdate,
    /// The global exit root was updated (pre-etrog forks).
    GlobalExitRootUpdate,
    /// A new leaf was added to the L1 info tree (etrog and later).
    L1InfoTreeUpdate,
    /// A batch was verified by an aggregator proof.
    VerifyBatch,
    /// A batch was verified against the trusted aggregator.
    TrustedVerifyBatch,
    /// The injected etrog sequence was updated.
    UpdateEtrogSequence,
    /// The initial injected batch of the etrog upgrade was sequenced.
    InitialSequenceBatches,
}

impl EventKind {
    /// Returns the str representation of the [`EventKind`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SequenceBatches => "sequence_batches",
            Self::ForcedBatches => "forced_batches",
            Self::SequenceForcedBatches => "sequence_forced_batches",
            Self::ForkIdUpdate => "fork_id_update",
            Self::GlobalExitRootUpdate => "global_exit_root_update",
            Self::L1InfoTreeUpdate => "l1_info_tree_update",
            Self::VerifyBatch => "verify_batch",
            Self::TrustedVerifyBatch => "trusted_verify_batch",
            Self::UpdateEtrogSequence => "update_etrog_sequence",
            Self::InitialSequenceBatches => "initial_sequence_batches",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The position of a single typed event within a block's event list.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EventOrder {
    /// The kind of the event.
    pub kind: EventKind,
    /// The position of the event within the block's event list.
    pub position: usize,
}

impl std::fmt::Display for EventOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.kind, self.position)
    }
}

/// A fork id update announced on L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkIdUpdate {
    /// The new fork id.
    pub new_fork_id: ForkId,
    /// The last batch number sequenced under the previous fork. The new fork
    /// applies from the next batch number onwards.
    pub effective_from_batch_number: u64,
    /// The wire-format version string announced with the fork.
    pub version: String,
    /// The L1 block number the update was emitted at.
    pub block_number: u64,
}

/// A global exit root update emitted by the pre-etrog exit root contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalExitRootUpdate {
    /// The L1 block number the update was emitted at.
    pub block_number: u64,
    /// The L1 block timestamp of the update.
    pub timestamp: u64,
    /// The mainnet exit root.
    pub mainnet_exit_root: B256,
    /// The rollup exit root.
    pub rollup_exit_root: B256,
    /// The resulting global exit root.
    pub global_exit_root: B256,
}

/// A batch verification emitted by the rollup contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyBatchData {
    /// The L1 block number the verification was emitted at.
    pub block_number: u64,
    /// The last verified batch number.
    pub batch_number: u64,
    /// The state root asserted by the proof.
    pub state_root: B256,
    /// The aggregator address that submitted the proof.
    pub aggregator: Address,
    /// The hash of the L1 verification transaction.
    pub l1_tx_hash: B256,
}

/// An update of the injected etrog sequence, emitted while the network
/// recovers from an emergency state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEtrogSequenceData {
    /// The number of the injected batch being updated.
    pub batch_number: u64,
    /// The sequencer address that submitted the update.
    pub sequencer: Address,
    /// The hash of the L1 update transaction.
    pub l1_tx_hash: B256,
    /// The raw L2 transaction data of the updated batch.
    pub transactions: Bytes,
    /// The global exit root anchored by the update.
    pub global_exit_root: B256,
    /// The forced timestamp of the updated batch.
    pub timestamp: u64,
    /// The L1 block hash anchoring the update.
    pub block_hash: B256,
}

/// A single typed L1 event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum L1Event {
    /// A new sequence of batches.
    SequenceBatches(Vec<SequencedBatchEnvelope>),
    /// Newly forced batches, published directly on L1.
    ForcedBatches(Vec<ForcedBatch>),
    /// A sequence consuming previously forced batches.
    SequenceForcedBatches(Vec<SequencedBatchEnvelope>),
    /// A fork id update.
    ForkIdUpdate(ForkIdUpdate),
    /// A global exit root update.
    GlobalExitRootUpdate(GlobalExitRootUpdate),
    /// A new L1 info tree leaf.
    L1InfoTreeUpdate(L1InfoTreeLeaf),
    /// A batch verification.
    VerifyBatch(VerifyBatchData),
    /// A trusted aggregator batch verification.
    TrustedVerifyBatch(VerifyBatchData),
    /// An update of the injected etrog sequence.
    UpdateEtrogSequence(UpdateEtrogSequenceData),
    /// The initial injected sequence of the etrog upgrade.
    InitialSequenceBatches(Vec<SequencedBatchEnvelope>),
}

impl L1Event {
    /// Returns the [`EventKind`] of the event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SequenceBatches(_) => EventKind::SequenceBatches,
            Self::ForcedBatches(_) => EventKind::ForcedBatches,
            Self::SequenceForcedBatches(_) => EventKind::SequenceForcedBatches,
            Self::ForkIdUpdate(_) => EventKind::ForkIdUpdate,
            Self::GlobalExitRootUpdate(_) => EventKind::GlobalExitRootUpdate,
            Self::L1InfoTreeUpdate(_) => EventKind::L1InfoTreeUpdate,
            Self::VerifyBatch(_) => EventKind::VerifyBatch,
            Self::TrustedVerifyBatch(_) => EventKind::TrustedVerifyBatch,
            Self::UpdateEtrogSequence(_) => EventKind::UpdateEtrogSequence,
            Self::InitialSequenceBatches(_) => EventKind::InitialSequenceBatches,
        }
    }

    /// Returns the batch number against which the active fork id must be
    /// resolved for this event, if the event targets a batch.
    ///
    /// Events that do not target a specific batch (exit root and info tree
    /// updates) resolve against the node's last known batch number instead.
    pub fn target_batch_number(&self) -> Option<u64> {
        match self {
            Self::SequenceBatches(batches) |
            Self::SequenceForcedBatches(batches) |
            Self::InitialSequenceBatches(batches) => batches.first().map(|b| b.batch_number),
            Self::ForcedBatches(forced) => forced.first().map(|f| f.forced_batch_number),
            Self::ForkIdUpdate(update) => Some(update.effective_from_batch_number),
            Self::VerifyBatch(data) | Self::TrustedVerifyBatch(data) => Some(data.batch_number),
            Self::UpdateEtrogSequence(data) => Some(data.batch_number),
            Self::GlobalExitRootUpdate(_) | Self::L1InfoTreeUpdate(_) => None,
        }
    }
}
