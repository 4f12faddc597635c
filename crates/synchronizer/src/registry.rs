use crate::{L1EventProcessor, ProcessOutcome, SyncError};
use std::{collections::HashMap, sync::Arc};
use zkevm_db::DatabaseTransaction;
use zkevm_node_primitives::{EventKind, EventOrder, ForkId, L1BlockWithEvents, L1Event};

/// The dispatch table routing each event to the processor implementing the rules active for its
/// fork.
///
/// Built once at startup from all registered processors. Registering two processors for the same
/// `(fork id, event kind)` pair is a programming error and panics immediately rather than
/// surfacing at runtime.
#[derive(Debug, Default)]
pub struct ProcessorRegistry {
    processors: HashMap<ForkId, HashMap<EventKind, Arc<dyn L1EventProcessor>>>,
}

impl ProcessorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a processor under every `(fork id, event kind)` pair it declares.
    ///
    /// # Panics
    ///
    /// Panics if a processor is already registered for one of the pairs.
    pub fn register(&mut self, processor: Arc<dyn L1EventProcessor>) {
        for fork_id in processor.supported_forks() {
            let by_kind = self.processors.entry(*fork_id).or_default();
            for kind in processor.supported_events() {
                if let Some(existing) = by_kind.get(kind) {
                    panic!(
                        "processor {} already registered for fork {fork_id} and event {kind}, cannot register {}",
                        existing.name(),
                        processor.name()
                    );
                }
                by_kind.insert(*kind, processor.clone());
            }
        }
    }

    /// Looks up the processor for the provided fork id and event kind. Falls back to the
    /// wildcard fork id when no exact match exists.
    pub fn lookup(&self, fork_id: ForkId, kind: EventKind) -> Option<&Arc<dyn L1EventProcessor>> {
        self.processors
            .get(&fork_id)
            .and_then(|by_kind| by_kind.get(&kind))
            .or_else(|| self.processors.get(&ForkId::WILDCARD).and_then(|by_kind| by_kind.get(&kind)))
    }

    /// Dispatches an event to the processor registered for the provided fork id.
    ///
    /// Returns [`SyncError::CantProcessEvent`] when no processor covers the pair; this indicates
    /// a configuration or protocol-coverage bug and must never be skipped.
    pub async fn process(
        &self,
        fork_id: ForkId,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        order: EventOrder,
        event: &L1Event,
    ) -> Result<ProcessOutcome, SyncError> {
        let processor = self
            .lookup(fork_id, order.kind)
            .ok_or(SyncError::CantProcessEvent { fork_id, kind: order.kind })?;
        tracing::debug!(
            target: "zkevm::sync",
            processor = processor.name(),
            %fork_id,
            %order,
            block_number = block.number,
            "Dispatching event."
        );
        processor.process(tx, block, order, event).await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug)]
    struct NoopProcessor {
        name: &'static str,
        forks: &'static [ForkId],
        events: &'static [EventKind],
    }

    #[async_trait::async_trait]
    impl L1EventProcessor for NoopProcessor {
        fn name(&self) -> &'static str {
            self.name
        }

        fn supported_forks(&self) -> &'static [ForkId] {
            self.forks
        }

        fn supported_events(&self) -> &'static [EventKind] {
            self.events
        }

        async fn process(
            &self,
            _tx: &DatabaseTransaction,
            _block: &L1BlockWithEvents,
            _order: EventOrder,
            _event: &L1Event,
        ) -> Result<ProcessOutcome, SyncError> {
            Ok(ProcessOutcome::Processed)
        }
    }

    #[test]
    fn test_lookup_prefers_exact_fork_over_wildcard() {
        let mut registry = ProcessorRegistry::new();
        registry.register(Arc::new(NoopProcessor {
            name: "fork-six",
            forks: &[ForkId(6)],
            events: &[EventKind::SequenceBatches],
        }));
        registry.register(Arc::new(NoopProcessor {
            name: "wildcard",
            forks: &[ForkId::WILDCARD],
            events: &[EventKind::SequenceBatches],
        }));

        // The exact fork id wins over the wildcard.
        let processor = registry.lookup(ForkId(6), EventKind::SequenceBatches).unwrap();
        assert_eq!("fork-six", processor.name());

        // An unregistered fork id falls back to the wildcard.
        let processor = registry.lookup(ForkId(7), EventKind::SequenceBatches).unwrap();
        assert_eq!("wildcard", processor.name());
    }

    #[test]
    fn test_lookup_returns_none_without_coverage() {
        let mut registry = ProcessorRegistry::new();
        registry.register(Arc::new(NoopProcessor {
            name: "fork-six",
            forks: &[ForkId(6)],
            events: &[EventKind::SequenceBatches],
        }));

        assert!(registry.lookup(ForkId(7), EventKind::SequenceBatches).is_none());
        assert!(registry.lookup(ForkId(6), EventKind::ForcedBatches).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut registry = ProcessorRegistry::new();
        registry.register(Arc::new(NoopProcessor {
            name: "first",
            forks: &[ForkId(6)],
            events: &[EventKind::SequenceBatches],
        }));
        registry.register(Arc::new(NoopProcessor {
            name: "second",
            forks: &[ForkId(6)],
            events: &[EventKind::SequenceBatches],
        }));
    }
}
