use crate::{
    bookkeeping::{FlushTracker, TrustedSyncBookkeeping},
    metrics::{MetricsHandler, Task},
    pool_reorg::PoolReorgCoordinator,
    SyncError,
};
use alloy_primitives::B256;
use std::sync::Arc;
use zkevm_db::{DatabaseOperations, DatabaseTransaction};
use zkevm_node_primitives::{
    Batch, ExecutionResult, L1BlockWithEvents, ProcessingContext, Sequence,
    SequencedBatchEnvelope, TrustedReorg, VirtualBatch,
};
use zkevm_node_providers::{ExecutionService, HaltHandler};

/// The batch number of the injected batch sequenced at the etrog upgrade.
pub(crate) const INJECTED_BATCH_NUMBER: u64 = 1;

/// How the trusted batch timestamp is checked against the L1-declared time limit when deciding
/// reorg status.
///
/// The comparison operator differs between fork generations; it is carried as data so each
/// sequence processor states its own rule in one place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TimestampRule {
    /// The declared limit must strictly exceed the trusted batch timestamp.
    Exclusive,
    /// The declared limit may equal the trusted batch timestamp.
    Inclusive,
}

impl TimestampRule {
    /// Returns true when the trusted timestamp is within the declared limit.
    pub(crate) fn within_limit(&self, trusted_timestamp: u64, declared_limit: u64) -> bool {
        match self {
            Self::Exclusive => trusted_timestamp < declared_limit,
            Self::Inclusive => trusted_timestamp <= declared_limit,
        }
    }
}

/// How the execution inputs of an ordinary (non-forced) batch are resolved.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum InputResolution {
    /// The global exit root is declared explicitly on the sequence event (pre-etrog forks).
    Declared,
    /// The global exit root is resolved from the L1 info tree leaves referenced by the batch's
    /// L2 data (etrog and later).
    L1InfoTree,
}

/// The per-fork-generation reconciliation rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ReconcileRules {
    /// The input resolution mode.
    pub inputs: InputResolution,
    /// The timestamp ordering rule.
    pub timestamp: TimestampRule,
}

impl ReconcileRules {
    /// The rules of the pre-etrog fork generations.
    pub(crate) const fn legacy() -> Self {
        Self { inputs: InputResolution::Declared, timestamp: TimestampRule::Inclusive }
    }

    /// The rules of the etrog fork generation.
    pub(crate) const fn etrog() -> Self {
        Self { inputs: InputResolution::L1InfoTree, timestamp: TimestampRule::Exclusive }
    }

    /// The rules of the elderberry fork generation: etrog input resolution with a tolerant
    /// timestamp limit check.
    pub(crate) const fn elderberry() -> Self {
        Self { inputs: InputResolution::L1InfoTree, timestamp: TimestampRule::Inclusive }
    }
}

/// The per-batch reconciliation engine shared by the sequence batch processors.
///
/// Resolves execution inputs from L1-declared data, derives or re-validates trusted state,
/// classifies divergence and persists the L1 commitments. Held by composition inside each
/// versioned processor.
#[derive(Debug, Clone)]
pub(crate) struct BatchReconciler {
    executor: Arc<dyn ExecutionService>,
    halt: Arc<dyn HaltHandler>,
    pool_reorg: PoolReorgCoordinator,
    bookkeeping: TrustedSyncBookkeeping,
    flush: FlushTracker,
    metrics: MetricsHandler,
    is_trusted_sequencer: bool,
}

impl BatchReconciler {
    /// Creates a new [`BatchReconciler`].
    pub(crate) fn new(
        executor: Arc<dyn ExecutionService>,
        halt: Arc<dyn HaltHandler>,
        pool_reorg: PoolReorgCoordinator,
        bookkeeping: TrustedSyncBookkeeping,
        flush: FlushTracker,
        is_trusted_sequencer: bool,
    ) -> Self {
        Self {
            executor,
            halt,
            pool_reorg,
            bookkeeping,
            flush,
            metrics: MetricsHandler::default(),
            is_trusted_sequencer,
        }
    }

    /// Reconciles all batch entries of one sequence event, in ascending batch number order, and
    /// upserts the covered [`Sequence`] range.
    pub(crate) async fn process_sequence(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        batches: &[SequencedBatchEnvelope],
        rules: ReconcileRules,
    ) -> Result<(), SyncError> {
        let (first, last) = match (batches.first(), batches.last()) {
            (Some(first), Some(last)) => (first.batch_number, last.batch_number),
            _ => {
                return Err(SyncError::InvalidParams(
                    "sequence event carries no batch entries".to_owned(),
                ))
            }
        };

        for sbatch in batches {
            let start = std::time::Instant::now();
            let ctx = self.resolve_inputs(tx, block, sbatch, rules).await?;
            self.reconcile_batch(tx, block, sbatch, ctx, rules).await?;
            if let Some(metric) = self.metrics.get(Task::BatchReconciliation) {
                metric.task_duration.record(start.elapsed().as_secs_f64());
            }
        }

        tx.upsert_sequence(Sequence { from_batch_number: first, to_batch_number: last }).await?;
        Ok(())
    }

    /// Resolves the execution inputs for one sequenced batch entry.
    async fn resolve_inputs(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        sbatch: &SequencedBatchEnvelope,
        rules: ReconcileRules,
    ) -> Result<ProcessingContext, SyncError> {
        if let Some(forced) = &sbatch.forced {
            // The injected batch of the etrog upgrade resolves directly from the L1-declared
            // forced data; it does not consume the forced batch queue.
            if sbatch.batch_number == INJECTED_BATCH_NUMBER &&
                rules.inputs == InputResolution::L1InfoTree
            {
                return Ok(ProcessingContext {
                    batch_number: sbatch.batch_number,
                    coinbase: sbatch.coinbase,
                    timestamp: forced.timestamp,
                    global_exit_root: forced.global_exit_root,
                    l1_info_root: sbatch.l1_info_root,
                    forced_batch_number: None,
                    forced_block_hash_l1: Some(forced.block_hash),
                    batch_l2_data: sbatch.transactions.clone(),
                });
            }

            // Ordinary forced consumption: pop the queue in strict forced batch number order and
            // verify the local record agrees with the L1 declaration bit for bit. A caller-level
            // retry of an already committed event reuses the consumption recorded the first time.
            let (queued, already_consumed) =
                match tx.get_forced_batch_consumed_by(sbatch.batch_number).await? {
                    Some(consumed) => (consumed, true),
                    None => (
                        tx.get_next_forced_batch()
                            .await?
                            .ok_or(SyncError::ForcedBatchQueueEmpty(sbatch.batch_number))?,
                        false,
                    ),
                };
            let mut mismatches = Vec::new();
            if queued.forced_at != forced.timestamp {
                mismatches.push(format!(
                    "timestamp: queued {}, declared {}",
                    queued.forced_at, forced.timestamp
                ));
            }
            if queued.global_exit_root != forced.global_exit_root {
                mismatches.push(format!(
                    "global exit root: queued {}, declared {}",
                    queued.global_exit_root, forced.global_exit_root
                ));
            }
            if queued.raw_tx_data != sbatch.transactions {
                mismatches.push("raw tx data".to_owned());
            }
            if !mismatches.is_empty() {
                return Err(SyncError::ForcedBatchMismatch {
                    forced_batch_number: queued.forced_batch_number,
                    reason: mismatches.join("; "),
                });
            }
            if !already_consumed {
                tx.mark_forced_batch_consumed(queued.forced_batch_number, sbatch.batch_number)
                    .await?;
            }

            return Ok(ProcessingContext {
                batch_number: sbatch.batch_number,
                coinbase: sbatch.coinbase,
                timestamp: forced.timestamp,
                global_exit_root: forced.global_exit_root,
                l1_info_root: sbatch.l1_info_root,
                forced_batch_number: Some(queued.forced_batch_number),
                forced_block_hash_l1: Some(forced.block_hash),
                batch_l2_data: sbatch.transactions.clone(),
            });
        }

        // Ordinary batch.
        let global_exit_root = match rules.inputs {
            InputResolution::Declared => sbatch.global_exit_root,
            InputResolution::L1InfoTree if sbatch.global_exit_root != B256::ZERO => {
                sbatch.global_exit_root
            }
            InputResolution::L1InfoTree => {
                self.resolve_exit_root_from_leaves(tx, &sbatch.l1_info_leaf_indices).await?
            }
        };

        // Legacy sequences declare the exact batch timestamp; etrog and later declare an upper
        // limit, the batch closing at the L1 block time of the sequencing transaction.
        let timestamp = match rules.inputs {
            InputResolution::Declared => sbatch.timestamp_limit,
            InputResolution::L1InfoTree => block.timestamp.min(sbatch.timestamp_limit),
        };

        Ok(ProcessingContext {
            batch_number: sbatch.batch_number,
            coinbase: sbatch.coinbase,
            timestamp,
            global_exit_root,
            l1_info_root: sbatch.l1_info_root,
            forced_batch_number: None,
            forced_block_hash_l1: None,
            batch_l2_data: sbatch.transactions.clone(),
        })
    }

    /// Resolves the global exit root from the referenced L1 info tree leaves: the last referenced
    /// leaf wins, and a batch referencing no leaves falls back to the first-ever leaf.
    async fn resolve_exit_root_from_leaves(
        &self,
        tx: &DatabaseTransaction,
        leaf_indices: &[u32],
    ) -> Result<B256, SyncError> {
        match leaf_indices.last() {
            Some(index) => Ok(tx
                .get_l1_info_leaf_by_index(*index)
                .await?
                .ok_or(SyncError::MissingL1InfoTreeLeaf(*index))?
                .global_exit_root),
            None => Ok(tx
                .get_l1_info_leaf_by_index(0)
                .await?
                .map(|leaf| leaf.global_exit_root)
                .unwrap_or_default()),
        }
    }

    /// Derives or re-validates the trusted state for one batch and persists its L1 commitment.
    async fn reconcile_batch(
        &self,
        tx: &DatabaseTransaction,
        block: &L1BlockWithEvents,
        sbatch: &SequencedBatchEnvelope,
        ctx: ProcessingContext,
        rules: ReconcileRules,
    ) -> Result<(), SyncError> {
        let trusted = tx.get_batch_by_number(sbatch.batch_number).await?;

        match trusted {
            None => {
                // Never executed locally: derive the batch from the L1-declared inputs now.
                tracing::debug!(
                    target: "zkevm::sync",
                    batch_number = sbatch.batch_number,
                    "Batch unknown locally, deriving from L1 data."
                );
                let result = self.executor.process_batch(&ctx).await?;
                self.flush.observe(result.flush_id, &result.prover_id);
                tx.insert_batch(derived_batch(&ctx, &result)).await?;
            }
            Some(trusted) => {
                // Re-execute from the L1-declared inputs to independently recompute what L1
                // asserts, and persist the accumulated input hash.
                let result = self.executor.process_batch(&ctx).await?;
                self.flush.observe(result.flush_id, &result.prover_id);
                tx.set_batch_acc_input_hash(sbatch.batch_number, result.new_acc_input_hash)
                    .await?;

                if let Some(reason) = compare_batch(&trusted, sbatch, &ctx, &result, rules) {
                    self.handle_trusted_reorg(tx, sbatch, &ctx, &result, &trusted, reason)
                        .await?;
                }
            }
        }

        // Always persist the L1 commitment, regardless of the comparison outcome. An existing
        // record (caller-level retry) is left untouched.
        if tx.get_virtual_batch_by_number(sbatch.batch_number).await?.is_none() {
            tx.insert_virtual_batch(VirtualBatch {
                batch_number: sbatch.batch_number,
                l1_tx_hash: sbatch.l1_tx_hash,
                block_number: block.number,
                sequencer: sbatch.sequencer,
                l1_info_root: sbatch.l1_info_root,
                timestamp_batch_etrog: (rules.inputs == InputResolution::L1InfoTree)
                    .then_some(sbatch.timestamp_limit),
            })
            .await?;
        }

        Ok(())
    }

    /// Resolves a detected divergence between trusted state and the L1 declaration.
    async fn handle_trusted_reorg(
        &self,
        tx: &DatabaseTransaction,
        sbatch: &SequencedBatchEnvelope,
        ctx: &ProcessingContext,
        result: &ExecutionResult,
        trusted: &Batch,
        reason: String,
    ) -> Result<(), SyncError> {
        let batch_number = sbatch.batch_number;

        if self.is_trusted_sequencer {
            // The sequencer disagreeing with its own commitment is a safety violation, not a
            // follower catching up. Stop making commitments instead of silently diverging.
            tracing::error!(
                target: "zkevm::sync",
                batch_number,
                %reason,
                "Trusted sequencer state diverges from its own L1 commitment."
            );
            self.halt.critical_error("sequence batch reconciliation", &reason).await;
            return Err(SyncError::TrustedStateDesync { batch_number, reason });
        }

        tracing::warn!(
            target: "zkevm::sync",
            batch_number,
            %reason,
            "Trusted reorg detected, rewinding and rederiving from L1 data."
        );
        if let Some(metric) = self.metrics.get(Task::BatchReconciliation) {
            metric.trusted_reorgs.increment(1);
        }

        // Hand the invalidated transactions back to the pool before any state is discarded.
        self.pool_reorg.reorg_from(tx, batch_number).await?;

        // A concurrent trusted-state follower must not resume from a now-invalid point.
        self.bookkeeping.clear();

        // Discard trusted state above the previous batch and re-derive this batch from the
        // L1-declared inputs. The execution service is deterministic, so the earlier
        // re-execution result is the derivation result.
        tx.reset_trusted_state_gt(batch_number.saturating_sub(1)).await?;
        tx.insert_batch(derived_batch(ctx, result)).await?;

        // A batch that was merely not yet closed locally is expected divergence, not a fault.
        if trusted.wip {
            tracing::debug!(
                target: "zkevm::sync",
                batch_number,
                "Reorged batch was work in progress, skipping audit entry."
            );
        } else {
            tx.insert_trusted_reorg(TrustedReorg { batch_number, reason }).await?;
        }

        Ok(())
    }
}

/// Builds the closed trusted [`Batch`] derived from the provided inputs and execution result.
fn derived_batch(ctx: &ProcessingContext, result: &ExecutionResult) -> Batch {
    Batch {
        number: ctx.batch_number,
        coinbase: ctx.coinbase,
        timestamp: ctx.timestamp,
        global_exit_root: ctx.global_exit_root,
        l2_data: ctx.batch_l2_data.clone(),
        state_root: result.new_state_root,
        local_exit_root: result.new_local_exit_root,
        acc_input_hash: result.new_acc_input_hash,
        forced_batch_number: ctx.forced_batch_number,
        wip: false,
    }
}

/// Compares the L1-declared batch values against the trusted batch record, field by field.
///
/// Returns `None` when the views agree, or a human readable reason string naming every diverging
/// field.
fn compare_batch(
    trusted: &Batch,
    sbatch: &SequencedBatchEnvelope,
    ctx: &ProcessingContext,
    reference: &ExecutionResult,
    rules: ReconcileRules,
) -> Option<String> {
    let mut reasons = Vec::new();

    if trusted.state_root != reference.new_state_root {
        reasons.push(format!(
            "state root mismatch: trusted {}, reference {}",
            trusted.state_root, reference.new_state_root
        ));
    }
    if trusted.l2_data != sbatch.transactions {
        reasons.push("l2 data mismatch".to_owned());
    }
    if trusted.global_exit_root != ctx.global_exit_root {
        reasons.push(format!(
            "global exit root mismatch: trusted {}, declared {}",
            trusted.global_exit_root, ctx.global_exit_root
        ));
    }
    if trusted.coinbase != sbatch.coinbase {
        reasons.push(format!(
            "coinbase mismatch: trusted {}, declared {}",
            trusted.coinbase, sbatch.coinbase
        ));
    }
    if !rules.timestamp.within_limit(trusted.timestamp, sbatch.timestamp_limit) {
        reasons.push(format!(
            "timestamp out of limit: trusted {}, declared limit {}",
            trusted.timestamp, sbatch.timestamp_limit
        ));
    }

    if reasons.is_empty() {
        None
    } else {
        Some(reasons.join("; "))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::Address;

    fn trusted(timestamp: u64) -> Batch {
        Batch {
            number: 1,
            coinbase: Address::ZERO,
            timestamp,
            global_exit_root: B256::ZERO,
            l2_data: Default::default(),
            state_root: B256::ZERO,
            local_exit_root: B256::ZERO,
            acc_input_hash: B256::ZERO,
            forced_batch_number: None,
            wip: false,
        }
    }

    fn declared(timestamp_limit: u64) -> SequencedBatchEnvelope {
        SequencedBatchEnvelope {
            batch_number: 1,
            l1_tx_hash: B256::ZERO,
            sequencer: Address::ZERO,
            coinbase: Address::ZERO,
            transactions: Default::default(),
            global_exit_root: B256::ZERO,
            timestamp_limit,
            l1_info_root: None,
            l1_info_leaf_indices: vec![],
            forced: None,
        }
    }

    fn reference() -> ExecutionResult {
        ExecutionResult {
            new_state_root: B256::ZERO,
            new_local_exit_root: B256::ZERO,
            new_acc_input_hash: B256::ZERO,
            flush_id: 1,
            prover_id: "test".to_owned(),
        }
    }

    fn ctx() -> ProcessingContext {
        ProcessingContext {
            batch_number: 1,
            coinbase: Address::ZERO,
            timestamp: 0,
            global_exit_root: B256::ZERO,
            l1_info_root: None,
            forced_batch_number: None,
            forced_block_hash_l1: None,
            batch_l2_data: Default::default(),
        }
    }

    #[test]
    fn test_timestamp_rule_operators_differ_at_equality() {
        // The etrog rule rejects equality, the elderberry relaxation tolerates it.
        assert!(
            compare_batch(&trusted(10), &declared(10), &ctx(), &reference(), ReconcileRules::etrog())
                .is_some()
        );
        assert!(compare_batch(
            &trusted(10),
            &declared(10),
            &ctx(),
            &reference(),
            ReconcileRules::elderberry()
        )
        .is_none());
        // Both reject a trusted timestamp beyond the declared limit.
        assert!(compare_batch(
            &trusted(11),
            &declared(10),
            &ctx(),
            &reference(),
            ReconcileRules::elderberry()
        )
        .is_some());
    }

    #[test]
    fn test_compare_names_each_diverging_field() {
        let rules = ReconcileRules::legacy();
        let base_trusted = trusted(5);
        let base_declared = declared(10);

        let mut t = base_trusted.clone();
        t.state_root = B256::with_last_byte(1);
        let reason = compare_batch(&t, &base_declared, &ctx(), &reference(), rules).unwrap();
        assert!(reason.contains("state root"));

        let mut t = base_trusted.clone();
        t.l2_data = vec![1].into();
        let reason = compare_batch(&t, &base_declared, &ctx(), &reference(), rules).unwrap();
        assert!(reason.contains("l2 data"));

        let mut t = base_trusted.clone();
        t.global_exit_root = B256::with_last_byte(1);
        let reason = compare_batch(&t, &base_declared, &ctx(), &reference(), rules).unwrap();
        assert!(reason.contains("global exit root"));

        let mut t = base_trusted.clone();
        t.coinbase = Address::with_last_byte(1);
        let reason = compare_batch(&t, &base_declared, &ctx(), &reference(), rules).unwrap();
        assert!(reason.contains("coinbase"));

        let mut t = base_trusted;
        t.timestamp = 11;
        let reason = compare_batch(&t, &base_declared, &ctx(), &reference(), rules).unwrap();
        assert!(reason.contains("timestamp"));

        assert!(compare_batch(&trusted(5), &base_declared, &ctx(), &reference(), rules).is_none());
    }
}
