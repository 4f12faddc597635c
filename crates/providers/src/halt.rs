use std::time::Duration;

/// The halt handler collaborator.
///
/// Invoked exactly once per fatal condition. Implementations are expected to stop batch
/// production safely and may block forever until operator intervention; there is no automatic
/// recovery from a critical error.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait HaltHandler: Send + Sync + std::fmt::Debug {
    /// Reports a fatal condition.
    async fn critical_error(&self, context: &str, error: &str);
}

/// A halt handler that never returns, re-emitting the fatal condition until the operator
/// restarts the process.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct LoggingHalt;

#[async_trait::async_trait]
impl HaltHandler for LoggingHalt {
    async fn critical_error(&self, context: &str, error: &str) {
        loop {
            tracing::error!(target: "zkevm::halt", context, error, "Fatal condition, halting. Operator intervention required.");
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    }
}
