//! Collaborator interfaces consumed by the zkEVM synchronizer.

pub use execution::{ExecutionError, ExecutionService};
mod execution;

pub use halt::HaltHandler;
mod halt;

pub use pool::{PoolError, TxPool};
mod pool;

pub use trusted::{TrustedBlockSource, TrustedRpcError};
mod trusted;

#[cfg(any(test, feature = "test-utils"))]
/// Test doubles for the provider traits.
pub mod test_utils;
