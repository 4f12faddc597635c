use metrics::{Counter, Histogram};
use metrics_derive::Metrics;
use std::collections::HashMap;
use strum::{EnumIter, IntoEnumIterator};

/// The metric handler for the synchronizer. Tracks execution duration of various tasks.
#[derive(Debug, Clone)]
pub(crate) struct MetricsHandler {
    /// The synchronizer metrics, labeled per task.
    sync_task_metrics: HashMap<Task, SyncMetrics>,
}

impl MetricsHandler {
    /// Returns the [`SyncMetrics`] for the provided task.
    pub(crate) fn get(&self, task: Task) -> Option<&SyncMetrics> {
        self.sync_task_metrics.get(&task)
    }
}

impl Default for MetricsHandler {
    fn default() -> Self {
        Self {
            sync_task_metrics: Task::iter()
                .map(|i| {
                    let label = i.as_str();
                    (i, SyncMetrics::new_with_labels(&[("task", label)]))
                })
                .collect(),
        }
    }
}

/// An enum representing the synchronizer tasks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter)]
pub(crate) enum Task {
    /// Processing of one L1 block's worth of events.
    L1Block,
    /// Sequence batch reconciliation.
    BatchReconciliation,
}

impl Task {
    /// Returns the str representation of the [`Task`].
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            Self::L1Block => "l1_block",
            Self::BatchReconciliation => "batch_reconciliation",
        }
    }
}

/// The metrics for the [`crate::Synchronizer`].
#[derive(Metrics, Clone)]
#[metrics(scope = "synchronizer")]
pub(crate) struct SyncMetrics {
    /// The duration of the task for the synchronizer.
    pub task_duration: Histogram,
    /// The number of trusted reorgs handled by the synchronizer.
    pub trusted_reorgs: Counter,
}
