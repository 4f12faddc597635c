//! The versioned event processors and the default registry composition.

use crate::{
    auditor::ConsistencyAuditor,
    bookkeeping::{FlushTracker, TrustedSyncBookkeeping},
    pool_reorg::PoolReorgCoordinator,
    reconcile::BatchReconciler,
    L1EventProcessor, ProcessorRegistry, SynchronizerConfig,
};
use std::sync::Arc;
use zkevm_node_primitives::ForkId;
use zkevm_node_providers::{ExecutionService, HaltHandler, TrustedBlockSource, TxPool};

pub use elderberry::ElderberrySequenceBatchesProcessor;
mod elderberry;

pub use etrog::EtrogSequenceBatchesProcessor;
mod etrog;

pub use forced_batches::ForcedBatchesProcessor;
mod forced_batches;

pub use fork_id::ForkIdProcessor;
mod fork_id;

pub use global_exit_root::GlobalExitRootProcessor;
mod global_exit_root;

pub use l1_info_tree::L1InfoTreeProcessor;
mod l1_info_tree;

pub use sequence_batches::SequenceBatchesProcessor;
mod sequence_batches;

pub use verify_batch::VerifyBatchProcessor;
mod verify_batch;

/// The fork ids of the pre-etrog generations.
pub(crate) const FORKS_LEGACY: &[ForkId] =
    &[ForkId(1), ForkId(2), ForkId(3), ForkId(4), ForkId(5), ForkId(6)];

/// The fork id of the etrog generation.
pub(crate) const FORKS_ETROG: &[ForkId] = &[ForkId(7)];

/// The fork ids of the elderberry generation.
pub(crate) const FORKS_ELDERBERRY: &[ForkId] = &[ForkId(8), ForkId(9)];

/// The wildcard fork id set, applying to all forks without a more specific processor.
pub(crate) const FORKS_WILDCARD: &[ForkId] = &[ForkId::WILDCARD];

/// Builds the registry covering every fork generation and event kind of the protocol, with the
/// sequence processors wrapped by the consistency auditor.
#[allow(clippy::too_many_arguments)]
pub fn default_registry(
    executor: Arc<dyn ExecutionService>,
    pool: Arc<dyn TxPool>,
    halt: Arc<dyn HaltHandler>,
    trusted_source: Arc<dyn TrustedBlockSource>,
    bookkeeping: TrustedSyncBookkeeping,
    flush: FlushTracker,
    config: &SynchronizerConfig,
) -> ProcessorRegistry {
    let reconciler = BatchReconciler::new(
        executor,
        halt,
        PoolReorgCoordinator::new(pool),
        bookkeeping,
        flush,
        config.is_trusted_sequencer(),
    );

    let audit = |processor: Arc<dyn L1EventProcessor>| -> Arc<dyn L1EventProcessor> {
        Arc::new(ConsistencyAuditor::new(
            processor,
            trusted_source.clone(),
            config.audit_block_modulus(),
        ))
    };

    let mut registry = ProcessorRegistry::new();
    registry.register(audit(Arc::new(SequenceBatchesProcessor::new(reconciler.clone()))));
    registry.register(audit(Arc::new(EtrogSequenceBatchesProcessor::new(reconciler.clone()))));
    registry.register(audit(Arc::new(ElderberrySequenceBatchesProcessor::new(reconciler))));
    registry.register(Arc::new(ForkIdProcessor::new(config.is_trusted_sequencer())));
    registry.register(Arc::new(ForcedBatchesProcessor::default()));
    registry.register(Arc::new(GlobalExitRootProcessor::default()));
    registry.register(Arc::new(L1InfoTreeProcessor::default()));
    registry.register(Arc::new(VerifyBatchProcessor::default()));
    registry
}
