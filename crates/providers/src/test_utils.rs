//! Test doubles for the provider traits.

use crate::{
    ExecutionError, ExecutionService, HaltHandler, PoolError, TrustedBlockSource, TrustedRpcError,
    TxPool,
};

use alloy_primitives::{keccak256, B256};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};
use zkevm_node_primitives::{ExecutionResult, PooledTransaction, ProcessingContext};

/// A deterministic stub executor.
///
/// Derives the state root as a hash of the processing context, so identical inputs always
/// produce identical results and any input change produces a different root.
#[derive(Debug, Default)]
pub struct StubExecutor {
    flush_id: AtomicU64,
}

impl StubExecutor {
    /// Returns the state root the stub derives for the provided context.
    pub fn state_root_for(ctx: &ProcessingContext) -> B256 {
        let mut input = Vec::new();
        input.extend_from_slice(&ctx.batch_number.to_be_bytes());
        input.extend_from_slice(ctx.coinbase.as_slice());
        input.extend_from_slice(&ctx.timestamp.to_be_bytes());
        input.extend_from_slice(ctx.global_exit_root.as_slice());
        input.extend_from_slice(&ctx.batch_l2_data);
        keccak256(input)
    }
}

#[async_trait::async_trait]
impl ExecutionService for StubExecutor {
    async fn process_batch(
        &self,
        ctx: &ProcessingContext,
    ) -> Result<ExecutionResult, ExecutionError> {
        let new_state_root = Self::state_root_for(ctx);
        let mut acc = new_state_root.to_vec();
        acc.extend_from_slice(b"acc");
        Ok(ExecutionResult {
            new_state_root,
            new_local_exit_root: keccak256(new_state_root),
            new_acc_input_hash: keccak256(acc),
            flush_id: self.flush_id.fetch_add(1, Ordering::Relaxed) + 1,
            prover_id: "stub-executor".to_owned(),
        })
    }
}

/// A pool double recording every call it receives.
#[derive(Debug, Default)]
pub struct RecordingPool {
    deleted: Mutex<Vec<B256>>,
    stored: Mutex<Vec<(PooledTransaction, bool)>>,
}

impl RecordingPool {
    /// Returns the hashes deleted from the pool so far.
    pub fn deleted(&self) -> Vec<B256> {
        self.deleted.lock().clone()
    }

    /// Returns the transactions stored into the pool so far, with their WIP flag.
    pub fn stored(&self) -> Vec<(PooledTransaction, bool)> {
        self.stored.lock().clone()
    }
}

#[async_trait::async_trait]
impl TxPool for RecordingPool {
    async fn delete_transactions(&self, hashes: &[B256]) -> Result<(), PoolError> {
        self.deleted.lock().extend_from_slice(hashes);
        Ok(())
    }

    async fn store_transaction(
        &self,
        transaction: PooledTransaction,
        wip: bool,
    ) -> Result<(), PoolError> {
        self.stored.lock().push((transaction, wip));
        Ok(())
    }
}

/// A trusted block source backed by an in-memory map.
#[derive(Debug, Default)]
pub struct MapBlockSource {
    blocks: Mutex<HashMap<u64, B256>>,
}

impl MapBlockSource {
    /// Sets the hash of the block with the provided number.
    pub fn set_block(&self, number: u64, hash: B256) {
        self.blocks.lock().insert(number, hash);
    }
}

#[async_trait::async_trait]
impl TrustedBlockSource for MapBlockSource {
    async fn block_hash_by_number(&self, number: u64) -> Result<Option<B256>, TrustedRpcError> {
        Ok(self.blocks.lock().get(&number).copied())
    }
}

/// A halt handler double recording every critical error it receives.
#[derive(Debug, Default)]
pub struct RecordingHalt {
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingHalt {
    /// Returns the critical errors reported so far.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().clone()
    }
}

#[async_trait::async_trait]
impl HaltHandler for RecordingHalt {
    async fn critical_error(&self, context: &str, error: &str) {
        self.errors.lock().push((context.to_owned(), error.to_owned()));
    }
}
