use parking_lot::RwLock;
use std::sync::Arc;

/// Shared bookkeeping of the trusted-state follower's progress.
///
/// The follower records the last trusted batch it synchronized to; the reconciliation engine
/// clears the cursor when a rewind invalidates that position, so the follower does not resume
/// from a now-invalid point. The holder is owned by the composing application and injected into
/// both parties.
#[derive(Debug, Default, Clone)]
pub struct TrustedSyncBookkeeping {
    last_trusted_batch: Arc<RwLock<Option<u64>>>,
}

impl TrustedSyncBookkeeping {
    /// Records the last trusted batch the follower synchronized to.
    pub fn set(&self, batch_number: u64) {
        *self.last_trusted_batch.write() = Some(batch_number);
    }

    /// Returns the last trusted batch the follower synchronized to, if any.
    pub fn get(&self) -> Option<u64> {
        *self.last_trusted_batch.read()
    }

    /// Clears the follower's cursor after a rewind.
    pub fn clear(&self) {
        *self.last_trusted_batch.write() = None;
    }
}

/// Tracker of pending flush ids announced by the execution collaborator.
///
/// Execution results carry the flush id under which the executor will persist its own state
/// changes; durability is confirmed out of band. The tracker only observes and logs, it is not
/// part of the database transaction.
#[derive(Debug, Default, Clone)]
pub struct FlushTracker {
    inner: Arc<RwLock<FlushState>>,
}

#[derive(Debug, Default)]
struct FlushState {
    pending_flush_id: u64,
    prover_id: Option<String>,
}

impl FlushTracker {
    /// Observes the flush id announced with an execution result.
    ///
    /// A change of prover identity resets the pending flush id, since flush ids are only
    /// monotonic within one prover instance.
    pub fn observe(&self, flush_id: u64, prover_id: &str) {
        let mut state = self.inner.write();
        if state.prover_id.as_deref() != Some(prover_id) {
            if state.prover_id.is_some() {
                tracing::warn!(
                    target: "zkevm::sync",
                    previous = ?state.prover_id,
                    current = prover_id,
                    "Prover changed, resetting pending flush id."
                );
            }
            state.prover_id = Some(prover_id.to_owned());
            state.pending_flush_id = flush_id;
            return;
        }
        if flush_id > state.pending_flush_id {
            state.pending_flush_id = flush_id;
        }
    }

    /// Returns the highest flush id still awaiting a durability confirmation.
    pub fn pending(&self) -> u64 {
        self.inner.read().pending_flush_id
    }

    /// Confirms durability up to the provided flush id.
    pub fn confirm(&self, flush_id: u64) {
        let state = self.inner.read();
        if flush_id < state.pending_flush_id {
            tracing::debug!(
                target: "zkevm::sync",
                confirmed = flush_id,
                pending = state.pending_flush_id,
                "Executor durability confirmations lagging behind."
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bookkeeping_clear() {
        let bookkeeping = TrustedSyncBookkeeping::default();
        bookkeeping.set(42);
        assert_eq!(Some(42), bookkeeping.get());
        bookkeeping.clear();
        assert_eq!(None, bookkeeping.get());
    }

    #[test]
    fn test_flush_tracker_monotonic_per_prover() {
        let tracker = FlushTracker::default();
        tracker.observe(3, "prover-a");
        tracker.observe(2, "prover-a");
        assert_eq!(3, tracker.pending());

        // A prover change resets the pending flush id.
        tracker.observe(1, "prover-b");
        assert_eq!(1, tracker.pending());
    }
}
