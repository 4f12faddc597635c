//! Integration tests of the sequence batch reconciliation engine.

use alloy_primitives::{Address, Bytes, B256};
use std::sync::Arc;
use zkevm_db::{test_utils::setup_test_db, Database, DatabaseOperations};
use zkevm_node_primitives::{
    Batch, EventKind, ForcedBatch, ForcedBatchData, ForkId, ForkIdInterval, ForkIdUpdate,
    GlobalExitRootUpdate, L1BlockWithEvents, L1Event, L1InfoTreeLeaf, PooledTransaction,
    SequencedBatchEnvelope, UpdateEtrogSequenceData, VerifyBatchData,
};
use zkevm_node_providers::test_utils::{
    MapBlockSource, RecordingHalt, RecordingPool, StubExecutor,
};
use zkevm_node_synchronizer::{
    processors::default_registry, BlockOutcome, FlushTracker, ProcessorRegistry, SyncError,
    Synchronizer, SynchronizerConfig, TrustedSyncBookkeeping,
};

struct Harness {
    db: Arc<Database>,
    pool: Arc<RecordingPool>,
    halt: Arc<RecordingHalt>,
    bookkeeping: TrustedSyncBookkeeping,
    synchronizer: Synchronizer,
}

async fn setup(config: SynchronizerConfig) -> Harness {
    let db = Arc::new(setup_test_db().await);
    let pool = Arc::new(RecordingPool::default());
    let halt = Arc::new(RecordingHalt::default());
    let bookkeeping = TrustedSyncBookkeeping::default();
    let registry = default_registry(
        Arc::new(StubExecutor::default()),
        pool.clone(),
        halt.clone(),
        Arc::new(MapBlockSource::default()),
        bookkeeping.clone(),
        FlushTracker::default(),
        &config,
    );
    let synchronizer = Synchronizer::new(db.clone(), registry);
    Harness { db, pool, halt, bookkeeping, synchronizer }
}

async fn seed_fork(db: &Database, fork_id: u64, from: u64) {
    db.insert_fork_id_interval(ForkIdInterval {
        from_batch_number: from,
        to_batch_number: u64::MAX,
        fork_id: ForkId(fork_id),
        version: format!("v{fork_id}"),
        block_number: 1,
    })
    .await
    .unwrap();
}

fn block(number: u64, timestamp: u64, events: Vec<L1Event>) -> L1BlockWithEvents {
    L1BlockWithEvents {
        number,
        hash: B256::with_last_byte(number as u8),
        parent_hash: B256::with_last_byte(number.saturating_sub(1) as u8),
        timestamp,
        received_at: timestamp,
        events,
    }
}

fn envelope(batch_number: u64) -> SequencedBatchEnvelope {
    SequencedBatchEnvelope {
        batch_number,
        l1_tx_hash: B256::with_last_byte((batch_number as u8).wrapping_add(0xa0)),
        sequencer: Address::with_last_byte(0x11),
        coinbase: Address::with_last_byte(0x22),
        transactions: Bytes::from(vec![batch_number as u8; 8]),
        global_exit_root: B256::ZERO,
        timestamp_limit: 1_000,
        l1_info_root: Some(B256::with_last_byte(0x33)),
        l1_info_leaf_indices: vec![],
        forced: None,
    }
}

#[tokio::test]
async fn test_sequence_derivation_is_idempotent() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 7, 0).await;

    let l1_block =
        block(10, 500, vec![L1Event::SequenceBatches(vec![envelope(2), envelope(3)])]);

    let outcome = harness.synchronizer.process_block(&l1_block).await.unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    // Both batches were derived, closed and virtualized, and the sequence range was stored.
    for number in [2, 3] {
        let batch = harness.db.get_batch_by_number(number).await.unwrap().unwrap();
        assert!(!batch.wip);
        assert_ne!(B256::ZERO, batch.state_root);
        assert!(harness.db.get_virtual_batch_by_number(number).await.unwrap().is_some());
    }
    let sequence = harness.db.get_sequence_by_from(2).await.unwrap().unwrap();
    assert_eq!(3, sequence.to_batch_number);

    // A caller-level retry of the same block must not create duplicates or audit rows.
    let outcome = harness.synchronizer.process_block(&l1_block).await.unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);
    assert!(harness.db.get_trusted_reorgs().await.unwrap().is_empty());
    assert_eq!(3, harness.db.get_last_batch_number().await.unwrap());
    assert_eq!(3, harness.db.get_last_virtual_batch_number().await.unwrap());
}

#[tokio::test]
async fn test_trusted_reorg_rewinds_and_rederives() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 7, 0).await;
    harness.bookkeeping.set(45);

    // Seed trusted state for batches 41..=43 with state roots that do not match what
    // re-execution of the L1 inputs will produce.
    let declared = envelope(42);
    for number in [41, 42, 43] {
        harness
            .db
            .insert_batch(Batch {
                number,
                coinbase: declared.coinbase,
                timestamp: 400,
                global_exit_root: B256::ZERO,
                l2_data: declared.transactions.clone(),
                state_root: B256::with_last_byte(0x01),
                local_exit_root: B256::ZERO,
                acc_input_hash: B256::ZERO,
                forced_batch_number: None,
                wip: false,
            })
            .await
            .unwrap();
    }
    for number in [42, 43] {
        harness
            .db
            .insert_l2_transaction(PooledTransaction {
                hash: B256::with_last_byte(number as u8),
                batch_number: number,
                encoded: vec![number as u8].into(),
            })
            .await
            .unwrap();
    }

    let outcome = harness
        .synchronizer
        .process_block(&block(10, 500, vec![L1Event::SequenceBatches(vec![declared.clone()])]))
        .await
        .unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    // The reorg was audited with a reason naming the diverging field.
    let reorgs = harness.db.get_trusted_reorgs().await.unwrap();
    assert_eq!(1, reorgs.len());
    assert_eq!(42, reorgs[0].batch_number);
    assert!(reorgs[0].reason.contains("state root"));

    // Everything above batch 41 was discarded and batch 42 rederived from L1 data.
    assert_eq!(42, harness.db.get_last_batch_number().await.unwrap());
    assert_eq!(42, harness.db.get_last_virtual_batch_number().await.unwrap());
    let rederived = harness.db.get_batch_by_number(42).await.unwrap().unwrap();
    assert_ne!(B256::with_last_byte(0x01), rederived.state_root);

    // The invalidated transactions went back to the pool flagged as work in progress.
    assert_eq!(
        vec![B256::with_last_byte(42), B256::with_last_byte(43)],
        harness.pool.deleted()
    );
    assert!(harness.pool.stored().iter().all(|(_, wip)| *wip));

    // The trusted-sync bookkeeping was cleared.
    assert_eq!(None, harness.bookkeeping.get());
}

#[tokio::test]
async fn test_trusted_sequencer_divergence_halts() {
    let harness = setup(SynchronizerConfig::new(true, 0)).await;
    seed_fork(&harness.db, 7, 0).await;

    let declared = envelope(42);
    harness
        .db
        .insert_batch(Batch {
            number: 42,
            coinbase: declared.coinbase,
            timestamp: 400,
            global_exit_root: B256::ZERO,
            l2_data: declared.transactions.clone(),
            state_root: B256::with_last_byte(0x01),
            local_exit_root: B256::ZERO,
            acc_input_hash: B256::ZERO,
            forced_batch_number: None,
            wip: false,
        })
        .await
        .unwrap();

    let err = harness
        .synchronizer
        .process_block(&block(10, 500, vec![L1Event::SequenceBatches(vec![declared])]))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::TrustedStateDesync { batch_number: 42, .. }));

    // The halt handler fired exactly once and the transaction was rolled back: the diverging
    // batch is untouched and no audit row exists.
    assert_eq!(1, harness.halt.errors().len());
    let batch = harness.db.get_batch_by_number(42).await.unwrap().unwrap();
    assert_eq!(B256::with_last_byte(0x01), batch.state_root);
    assert!(harness.db.get_trusted_reorgs().await.unwrap().is_empty());
    assert!(harness.db.get_virtual_batch_by_number(42).await.unwrap().is_none());
}

fn forced_envelope(batch_number: u64, raw: Bytes) -> SequencedBatchEnvelope {
    SequencedBatchEnvelope {
        transactions: raw,
        timestamp_limit: 700,
        forced: Some(ForcedBatchData {
            global_exit_root: B256::with_last_byte(0x44),
            timestamp: 700,
            block_hash: B256::with_last_byte(0x55),
        }),
        ..envelope(batch_number)
    }
}

fn queued_forced_batch(raw: Bytes) -> ForcedBatch {
    ForcedBatch {
        forced_batch_number: 1,
        global_exit_root: B256::with_last_byte(0x44),
        raw_tx_data: raw,
        sequencer: Address::with_last_byte(0x66),
        forced_at: 700,
        block_number: 9,
    }
}

#[tokio::test]
async fn test_forced_batch_consumed_in_order() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 9, 0).await;

    let raw = Bytes::from(vec![0xfa, 0xce]);
    let l1_block = block(
        10,
        800,
        vec![
            L1Event::ForcedBatches(vec![queued_forced_batch(raw.clone())]),
            L1Event::SequenceForcedBatches(vec![forced_envelope(5, raw)]),
        ],
    );

    let outcome = harness.synchronizer.process_block(&l1_block).await.unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    // The forced batch was consumed by batch 5 and the linkage recorded.
    assert!(harness.db.get_next_forced_batch().await.unwrap().is_none());
    let batch = harness.db.get_batch_by_number(5).await.unwrap().unwrap();
    assert_eq!(Some(1), batch.forced_batch_number);

    // A retry reuses the recorded consumption instead of popping the queue again.
    let outcome = harness.synchronizer.process_block(&l1_block).await.unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);
    assert!(harness.db.get_trusted_reorgs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_forced_batch_mismatch_is_fatal() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 9, 0).await;
    harness.db.insert_forced_batch(queued_forced_batch(vec![0xfa, 0xce].into())).await.unwrap();

    // The sequence declares different raw tx data than the queued forced batch.
    let err = harness
        .synchronizer
        .process_block(&block(
            10,
            800,
            vec![L1Event::SequenceForcedBatches(vec![forced_envelope(5, vec![0xbe, 0xef].into())])],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::ForcedBatchMismatch { forced_batch_number: 1, .. }));

    // The transaction was rolled back: no batch was derived and the queue is untouched.
    assert!(harness.db.get_batch_by_number(5).await.unwrap().is_none());
    assert!(harness.db.get_next_forced_batch().await.unwrap().is_some());
}

#[tokio::test]
async fn test_past_effective_fork_update_forces_resync() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 7, 0).await;
    for number in [99, 150] {
        harness
            .db
            .insert_batch(Batch {
                number,
                coinbase: Address::ZERO,
                timestamp: 1,
                global_exit_root: B256::ZERO,
                l2_data: Bytes::new(),
                state_root: B256::ZERO,
                local_exit_root: B256::ZERO,
                acc_input_hash: B256::ZERO,
                forced_batch_number: None,
                wip: false,
            })
            .await
            .unwrap();
    }

    let update = ForkIdUpdate {
        new_fork_id: ForkId(8),
        effective_from_batch_number: 100,
        version: "v8".to_owned(),
        block_number: 10,
    };
    let outcome = harness
        .synchronizer
        .process_block(&block(10, 500, vec![L1Event::ForkIdUpdate(update.clone())]))
        .await
        .unwrap();

    // The interval was persisted, the past batches rewound, and the caller instructed to
    // resynchronize rather than handed an error.
    assert_eq!(BlockOutcome::MustResync { from_batch_number: 101 }, outcome);
    assert_eq!(99, harness.db.get_last_batch_number().await.unwrap());
    assert_eq!(
        Some(ForkId(8)),
        harness.db.get_fork_id_by_batch_number(101).await.unwrap()
    );

    // Replaying the identical update is a harmless retry.
    let outcome = harness
        .synchronizer
        .process_block(&block(11, 501, vec![L1Event::ForkIdUpdate(update.clone())]))
        .await
        .unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    // A different definition for the same fork id is unrecoverable.
    let conflicting = ForkIdUpdate { effective_from_batch_number: 120, ..update };
    let err = harness
        .synchronizer
        .process_block(&block(12, 502, vec![L1Event::ForkIdUpdate(conflicting)]))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::ForkIdConflict(ForkId(8))));

    // So is a fork id below the stored maximum.
    let regressing = ForkIdUpdate {
        new_fork_id: ForkId(6),
        effective_from_batch_number: 200,
        version: "v6".to_owned(),
        block_number: 12,
    };
    let err = harness
        .synchronizer
        .process_block(&block(13, 503, vec![L1Event::ForkIdUpdate(regressing)]))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::ForkIdConflict(ForkId(6))));
}

#[tokio::test]
async fn test_trusted_sequencer_skips_fork_rewind() {
    let harness = setup(SynchronizerConfig::new(true, 0)).await;
    seed_fork(&harness.db, 7, 0).await;
    harness
        .db
        .insert_batch(Batch {
            number: 150,
            coinbase: Address::ZERO,
            timestamp: 1,
            global_exit_root: B256::ZERO,
            l2_data: Bytes::new(),
            state_root: B256::ZERO,
            local_exit_root: B256::ZERO,
            acc_input_hash: B256::ZERO,
            forced_batch_number: None,
            wip: false,
        })
        .await
        .unwrap();

    let update = ForkIdUpdate {
        new_fork_id: ForkId(8),
        effective_from_batch_number: 100,
        version: "v8".to_owned(),
        block_number: 10,
    };
    let outcome = harness
        .synchronizer
        .process_block(&block(10, 500, vec![L1Event::ForkIdUpdate(update)]))
        .await
        .unwrap();

    // The sequencer is the source of the batch history: the interval is stored but nothing is
    // rewound.
    assert_eq!(BlockOutcome::Processed, outcome);
    assert_eq!(150, harness.db.get_last_batch_number().await.unwrap());
}

#[tokio::test]
async fn test_resync_skips_remaining_events_in_block() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 7, 0).await;
    harness
        .db
        .insert_batch(Batch {
            number: 150,
            coinbase: Address::ZERO,
            timestamp: 1,
            global_exit_root: B256::ZERO,
            l2_data: Bytes::new(),
            state_root: B256::ZERO,
            local_exit_root: B256::ZERO,
            acc_input_hash: B256::ZERO,
            forced_batch_number: None,
            wip: false,
        })
        .await
        .unwrap();

    let update = ForkIdUpdate {
        new_fork_id: ForkId(8),
        effective_from_batch_number: 100,
        version: "v8".to_owned(),
        block_number: 10,
    };
    let outcome = harness
        .synchronizer
        .process_block(&block(
            10,
            500,
            vec![
                L1Event::ForkIdUpdate(update),
                L1Event::SequenceBatches(vec![envelope(151)]),
            ],
        ))
        .await
        .unwrap();

    // The resync signal ends the block early; the sequence event is left for the restarted
    // synchronization pass.
    assert_eq!(BlockOutcome::MustResync { from_batch_number: 101 }, outcome);
    assert!(harness.db.get_batch_by_number(151).await.unwrap().is_none());
}

#[tokio::test]
async fn test_etrog_exit_root_resolution_from_leaves() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 7, 0).await;

    let leaf = |index: u32, byte: u8| L1InfoTreeLeaf {
        leaf_index: index,
        global_exit_root: B256::with_last_byte(byte),
        mainnet_exit_root: B256::ZERO,
        rollup_exit_root: B256::ZERO,
        previous_block_hash: B256::ZERO,
        timestamp: 100,
        block_number: 9,
    };

    let mut referencing = envelope(2);
    referencing.l1_info_leaf_indices = vec![0, 1];
    let bare = envelope(3);

    let outcome = harness
        .synchronizer
        .process_block(&block(
            10,
            500,
            vec![
                L1Event::L1InfoTreeUpdate(leaf(0, 0xaa)),
                L1Event::L1InfoTreeUpdate(leaf(1, 0xbb)),
                L1Event::SequenceBatches(vec![referencing, bare]),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    // The last referenced leaf wins; a batch referencing no leaves falls back to leaf zero.
    let batch = harness.db.get_batch_by_number(2).await.unwrap().unwrap();
    assert_eq!(B256::with_last_byte(0xbb), batch.global_exit_root);
    let batch = harness.db.get_batch_by_number(3).await.unwrap().unwrap();
    assert_eq!(B256::with_last_byte(0xaa), batch.global_exit_root);
}

#[tokio::test]
async fn test_legacy_exit_root_and_verification_events() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 6, 0).await;

    let exit_root = GlobalExitRootUpdate {
        block_number: 10,
        timestamp: 500,
        mainnet_exit_root: B256::with_last_byte(1),
        rollup_exit_root: B256::with_last_byte(2),
        global_exit_root: B256::with_last_byte(3),
    };
    let verification = VerifyBatchData {
        block_number: 10,
        batch_number: 7,
        state_root: B256::with_last_byte(4),
        aggregator: Address::with_last_byte(5),
        l1_tx_hash: B256::with_last_byte(6),
    };

    let outcome = harness
        .synchronizer
        .process_block(&block(
            10,
            500,
            vec![
                L1Event::GlobalExitRootUpdate(exit_root.clone()),
                L1Event::VerifyBatch(verification.clone()),
                L1Event::TrustedVerifyBatch(verification),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    assert_eq!(Some(exit_root), harness.db.get_latest_exit_root().await.unwrap());
    // The trusted verification of the same batch replaced the earlier record.
    assert_eq!(7, harness.db.get_last_verified_batch_number().await.unwrap());
}

#[tokio::test]
async fn test_injected_batch_derivation_and_update() {
    let harness = setup(SynchronizerConfig::default()).await;
    seed_fork(&harness.db, 7, 0).await;

    let injected = SequencedBatchEnvelope {
        timestamp_limit: 600,
        forced: Some(ForcedBatchData {
            global_exit_root: B256::with_last_byte(0x77),
            timestamp: 600,
            block_hash: B256::with_last_byte(0x88),
        }),
        ..envelope(1)
    };
    let outcome = harness
        .synchronizer
        .process_block(&block(10, 700, vec![L1Event::InitialSequenceBatches(vec![injected])]))
        .await
        .unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    let batch = harness.db.get_batch_by_number(1).await.unwrap().unwrap();
    assert_eq!(B256::with_last_byte(0x77), batch.global_exit_root);
    // The injected batch resolves from the declared forced data, not the queue.
    assert_eq!(None, batch.forced_batch_number);
    assert_eq!(1, harness.db.get_sequence_by_from(1).await.unwrap().unwrap().to_batch_number);
    let before = batch.state_root;

    // The update event replaces the injected sequence data and rederives it.
    let update = UpdateEtrogSequenceData {
        batch_number: 1,
        sequencer: Address::with_last_byte(0x11),
        l1_tx_hash: B256::with_last_byte(0x99),
        transactions: vec![0xde, 0xad].into(),
        global_exit_root: B256::with_last_byte(0x77),
        timestamp: 650,
        block_hash: B256::with_last_byte(0x88),
    };
    let outcome = harness
        .synchronizer
        .process_block(&block(11, 701, vec![L1Event::UpdateEtrogSequence(update)]))
        .await
        .unwrap();
    assert_eq!(BlockOutcome::Processed, outcome);

    let batch = harness.db.get_batch_by_number(1).await.unwrap().unwrap();
    assert_eq!(Bytes::from(vec![0xde, 0xad]), batch.l2_data);
    assert_ne!(before, batch.state_root);
    assert_eq!(1, harness.db.get_last_batch_number().await.unwrap());
    assert_eq!(1, harness.db.get_last_virtual_batch_number().await.unwrap());
}

#[tokio::test]
async fn test_uncovered_event_is_a_coverage_bug() {
    let db = Arc::new(setup_test_db().await);
    seed_fork(&db, 7, 0).await;

    // A registry missing sequence coverage surfaces the gap instead of skipping the event.
    let registry = ProcessorRegistry::new();
    let synchronizer = Synchronizer::new(db, registry);
    let err = synchronizer
        .process_block(&block(10, 500, vec![L1Event::SequenceBatches(vec![envelope(2)])]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SyncError::CantProcessEvent { fork_id: ForkId(7), kind: EventKind::SequenceBatches }
    ));
}
