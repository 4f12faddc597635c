//! Primitive types for the zkEVM synchronizer node.

pub use block::{BlockInfo, L1BlockWithEvents};
mod block;

pub use event::{
    EventKind, EventOrder, ForkIdUpdate, GlobalExitRootUpdate, L1Event, UpdateEtrogSequenceData,
    VerifyBatchData,
};
mod event;

pub use batch::{
    Batch, ForcedBatch, ForcedBatchData, Sequence, SequencedBatchEnvelope, TrustedReorg,
    VerifiedBatch, VirtualBatch,
};
mod batch;

pub use fork::{ForkId, ForkIdInterval};
mod fork;

pub use context::{ExecutionResult, ProcessingContext};
mod context;

pub use l1_info_tree::L1InfoTreeLeaf;
mod l1_info_tree;

pub use transaction::PooledTransaction;
mod transaction;
