/// The error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A database error occurred.
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    /// A batch was not found in the database.
    #[error("batch [{0}] not found in database")]
    BatchNotFound(u64),
    /// A virtual batch was not found in the database.
    #[error("virtual batch [{0}] not found in database")]
    VirtualBatchNotFound(u64),
    /// A forced batch was not found in the database.
    #[error("forced batch [{0}] not found in database")]
    ForcedBatchNotFound(u64),
    /// An L1 info tree leaf was not found in the database.
    #[error("L1 info tree leaf at index [{0}] not found in database")]
    L1InfoLeafNotFound(u32),
}
