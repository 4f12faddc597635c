use alloy_primitives::{Address, Bytes, B256};

/// The derivation input assembled for one batch execution.
///
/// Never persisted: built per batch from the L1-declared data and handed to
/// the deterministic execution collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingContext {
    /// The batch number.
    pub batch_number: u64,
    /// The coinbase of the batch.
    pub coinbase: Address,
    /// The batch timestamp, or time limit under etrog semantics.
    pub timestamp: u64,
    /// The global exit root the batch executes against.
    pub global_exit_root: B256,
    /// The L1 info root the batch executes against (etrog and later).
    pub l1_info_root: Option<B256>,
    /// The forced batch number consumed by this batch, if any.
    pub forced_batch_number: Option<u64>,
    /// The forced L1 block hash used as an anchor (etrog injected batches).
    pub forced_block_hash_l1: Option<B256>,
    /// The raw L2 transaction bytes to execute.
    pub batch_l2_data: Bytes,
}

/// The result of a deterministic batch execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The state root after executing the batch.
    pub new_state_root: B256,
    /// The local exit root after executing the batch.
    pub new_local_exit_root: B256,
    /// The accumulated input hash after executing the batch.
    pub new_acc_input_hash: B256,
    /// The flush id under which the execution collaborator will persist its
    /// own state changes. Durability of the flush is confirmed out of band.
    pub flush_id: u64,
    /// The identity of the prover that executed the batch.
    pub prover_id: String,
}
