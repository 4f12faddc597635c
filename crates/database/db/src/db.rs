use super::{transaction::DatabaseTransaction, DatabaseConnectionProvider};
use crate::error::DatabaseError;

use sea_orm::{Database as SeaOrmDatabase, DatabaseConnection, TransactionTrait};

/// The [`Database`] struct is responsible for interacting with the database.
///
/// The [`Database`] type wraps a [`sea_orm::DatabaseConnection`]. We implement
/// [`DatabaseConnectionProvider`] for [`Database`] such that it can be used to perform the
/// operations defined in [`crate::DatabaseOperations`]. Atomic operations can be performed using
/// the [`Database::tx`] method which returns a [`DatabaseTransaction`] that also implements the
/// [`DatabaseConnectionProvider`] trait and thus the [`crate::DatabaseOperations`] trait.
#[derive(Debug)]
pub struct Database {
    /// The underlying database connection.
    connection: DatabaseConnection,
}

impl Database {
    /// Creates a new [`Database`] instance associated with the provided database URL.
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let connection = SeaOrmDatabase::connect(database_url).await?;
        Ok(Self { connection })
    }

    /// Creates a new [`DatabaseTransaction`] which can be used for atomic operations.
    pub async fn tx(&self) -> Result<DatabaseTransaction, DatabaseError> {
        Ok(DatabaseTransaction::new(self.connection.begin().await?))
    }
}

impl DatabaseConnectionProvider for Database {
    type Connection = DatabaseConnection;

    fn get_connection(&self) -> &Self::Connection {
        &self.connection
    }
}

impl From<DatabaseConnection> for Database {
    fn from(connection: DatabaseConnection) -> Self {
        Self { connection }
    }
}

#[cfg(test)]
mod test {
    use crate::{operations::DatabaseOperations, test_utils::setup_test_db};
    use alloy_primitives::B256;
    use arbitrary::{Arbitrary, Unstructured};
    use rand::Rng;
    use zkevm_node_primitives::{
        Batch, ForcedBatch, ForkId, ForkIdInterval, Sequence, VirtualBatch,
    };

    fn test_batch(number: u64) -> Batch {
        Batch {
            number,
            coinbase: Default::default(),
            timestamp: 100 + number,
            global_exit_root: B256::with_last_byte(1),
            l2_data: vec![0xca, 0xfe].into(),
            state_root: B256::with_last_byte(2),
            local_exit_root: B256::with_last_byte(3),
            acc_input_hash: B256::with_last_byte(4),
            forced_batch_number: None,
            wip: false,
        }
    }

    #[tokio::test]
    async fn test_database_round_trip_batch() {
        // Set up the test database.
        let db = setup_test_db().await;

        let batch = test_batch(1);
        db.insert_batch(batch.clone()).await.unwrap();
        let batch_from_db = db.get_batch_by_number(batch.number).await.unwrap().unwrap();
        assert_eq!(batch, batch_from_db);
        assert_eq!(1, db.get_last_batch_number().await.unwrap());
    }

    #[tokio::test]
    async fn test_database_round_trip_virtual_batch() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let mut bytes = [0u8; 1024];
        rand::rng().fill(bytes.as_mut_slice());
        let mut u = Unstructured::new(&bytes);

        let virtual_batch = VirtualBatch::arbitrary(&mut u).unwrap();
        db.insert_virtual_batch(virtual_batch.clone()).await.unwrap();
        let virtual_batch_from_db =
            db.get_virtual_batch_by_number(virtual_batch.batch_number).await.unwrap().unwrap();
        assert_eq!(virtual_batch, virtual_batch_from_db);
    }

    #[tokio::test]
    async fn test_database_tx_rollback() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Insert a batch in a transaction and roll it back.
        let tx = db.tx().await.unwrap();
        tx.insert_batch(test_batch(1)).await.unwrap();
        tx.rollback().await.unwrap();
        assert!(db.get_batch_by_number(1).await.unwrap().is_none());

        // Insert a batch in a transaction and commit it.
        let tx = db.tx().await.unwrap();
        tx.insert_batch(test_batch(1)).await.unwrap();
        tx.commit().await.unwrap();
        assert!(db.get_batch_by_number(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sequence_upsert_extends_but_never_shrinks() {
        // Set up the test database.
        let db = setup_test_db().await;

        db.upsert_sequence(Sequence { from_batch_number: 10, to_batch_number: 12 }).await.unwrap();
        // A repeated sequence with the same start and a larger end extends the range.
        db.upsert_sequence(Sequence { from_batch_number: 10, to_batch_number: 15 }).await.unwrap();
        let sequence = db.get_sequence_by_from(10).await.unwrap().unwrap();
        assert_eq!(15, sequence.to_batch_number);

        // A smaller end leaves the stored range untouched.
        db.upsert_sequence(Sequence { from_batch_number: 10, to_batch_number: 11 }).await.unwrap();
        let sequence = db.get_sequence_by_from(10).await.unwrap().unwrap();
        assert_eq!(15, sequence.to_batch_number);
    }

    #[tokio::test]
    async fn test_fork_id_resolution() {
        // Set up the test database.
        let db = setup_test_db().await;

        db.insert_fork_id_interval(ForkIdInterval {
            from_batch_number: 0,
            to_batch_number: 100,
            fork_id: ForkId(5),
            version: "v1".into(),
            block_number: 1,
        })
        .await
        .unwrap();
        db.insert_fork_id_interval(ForkIdInterval {
            from_batch_number: 101,
            to_batch_number: u64::MAX,
            fork_id: ForkId(6),
            version: "v2".into(),
            block_number: 10,
        })
        .await
        .unwrap();

        assert_eq!(Some(ForkId(5)), db.get_fork_id_by_batch_number(100).await.unwrap());
        assert_eq!(Some(ForkId(6)), db.get_fork_id_by_batch_number(101).await.unwrap());
        assert_eq!(Some(ForkId(6)), db.get_fork_id_by_batch_number(u64::MAX - 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_forced_batch_queue_order() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let mut bytes = [0u8; 1024];
        rand::rng().fill(bytes.as_mut_slice());
        let mut u = Unstructured::new(&bytes);

        let forced_1 =
            ForcedBatch { forced_batch_number: 1, ..ForcedBatch::arbitrary(&mut u).unwrap() };
        let forced_2 =
            ForcedBatch { forced_batch_number: 2, ..ForcedBatch::arbitrary(&mut u).unwrap() };
        db.insert_forced_batch(forced_2.clone()).await.unwrap();
        db.insert_forced_batch(forced_1.clone()).await.unwrap();

        // The queue pops in strict forced batch number order.
        assert_eq!(Some(forced_1.clone()), db.get_next_forced_batch().await.unwrap());
        db.mark_forced_batch_consumed(1, 50).await.unwrap();
        assert_eq!(Some(forced_2), db.get_next_forced_batch().await.unwrap());

        // Releasing the consumption marker requeues the forced batch.
        db.release_forced_batches_consumed_gt(49).await.unwrap();
        assert_eq!(Some(forced_1), db.get_next_forced_batch().await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_trusted_state() {
        // Set up the test database.
        let db = setup_test_db().await;

        // Generate unstructured bytes.
        let mut bytes = [0u8; 2048];
        rand::rng().fill(bytes.as_mut_slice());
        let mut u = Unstructured::new(&bytes);

        for number in 1..=3 {
            db.insert_batch(test_batch(number)).await.unwrap();
            let virtual_batch =
                VirtualBatch { batch_number: number, ..VirtualBatch::arbitrary(&mut u).unwrap() };
            db.insert_virtual_batch(virtual_batch).await.unwrap();
        }
        db.upsert_sequence(Sequence { from_batch_number: 2, to_batch_number: 3 }).await.unwrap();

        db.reset_trusted_state_gt(1).await.unwrap();

        assert_eq!(1, db.get_last_batch_number().await.unwrap());
        assert_eq!(1, db.get_last_virtual_batch_number().await.unwrap());
        assert!(db.get_sequence_by_from(2).await.unwrap().is_none());
    }
}
