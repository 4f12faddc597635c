use super::models;
use crate::{DatabaseConnectionProvider, DatabaseError};

use alloy_primitives::B256;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use zkevm_node_primitives::{
    Batch, ForcedBatch, ForkId, ForkIdInterval, GlobalExitRootUpdate, L1BlockWithEvents,
    L1InfoTreeLeaf, PooledTransaction, Sequence, TrustedReorg, VerifiedBatch, VirtualBatch,
};

/// The [`DatabaseOperations`] trait provides methods for interacting with the database.
///
/// All methods operate on whatever connection the implementor provides: the plain
/// [`crate::Database`] for standalone operations, or a [`crate::DatabaseTransaction`] when the
/// caller groups several operations into one atomic unit.
#[async_trait::async_trait]
pub trait DatabaseOperations: DatabaseConnectionProvider {
    /// Insert a processed L1 block into the database. Re-inserting an already stored block is a
    /// no-op, so redelivery of a committed unit of work is harmless.
    async fn insert_l1_block(&self, block: &L1BlockWithEvents) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", block_number = block.number, "Inserting L1 block into database.");
        if models::l1_block::Entity::find_by_id(
            TryInto::<i64>::try_into(block.number).expect("block number should fit in i64"),
        )
        .one(self.get_connection())
        .await?
        .is_some()
        {
            return Ok(());
        }
        let block: models::l1_block::ActiveModel = block.into();
        block.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get the number of the last processed L1 block.
    async fn get_last_l1_block_number(&self) -> Result<Option<u64>, DatabaseError> {
        Ok(models::l1_block::Entity::find()
            .order_by_desc(models::l1_block::Column::Number)
            .one(self.get_connection())
            .await?
            .map(|block| block.block_info().number))
    }

    /// Insert a trusted [`Batch`] into the database.
    async fn insert_batch(&self, batch: Batch) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", batch_number = batch.number, "Inserting batch into database.");
        let batch: models::batch::ActiveModel = batch.into();
        batch.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Update a trusted [`Batch`] in the database. Errors if the batch is not present.
    async fn update_batch(&self, batch: Batch) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", batch_number = batch.number, "Updating batch in database.");
        let number = batch.number;
        if models::batch::Entity::find_by_id(
            TryInto::<i64>::try_into(number).expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await?
        .is_none()
        {
            return Err(DatabaseError::BatchNotFound(number));
        }
        let batch: models::batch::ActiveModel = batch.into();
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Persist the accumulated input hash for the batch with the provided number.
    async fn set_batch_acc_input_hash(
        &self,
        batch_number: u64,
        acc_input_hash: B256,
    ) -> Result<(), DatabaseError> {
        let batch = models::batch::Entity::find_by_id(
            TryInto::<i64>::try_into(batch_number).expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await?
        .ok_or(DatabaseError::BatchNotFound(batch_number))?;
        let mut batch: Batch = batch.into();
        batch.acc_input_hash = acc_input_hash;
        let batch: models::batch::ActiveModel = batch.into();
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Get a trusted [`Batch`] from the database by its number.
    async fn get_batch_by_number(&self, batch_number: u64) -> Result<Option<Batch>, DatabaseError> {
        Ok(models::batch::Entity::find_by_id(
            TryInto::<i64>::try_into(batch_number).expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await
        .map(|x| x.map(Into::into))?)
    }

    /// Get the number of the last trusted batch, or zero when no batch exists.
    async fn get_last_batch_number(&self) -> Result<u64, DatabaseError> {
        Ok(models::batch::Entity::find()
            .order_by_desc(models::batch::Column::Number)
            .one(self.get_connection())
            .await?
            .map(|batch| Batch::from(batch).number)
            .unwrap_or_default())
    }

    /// Delete all trusted [`Batch`]es with a number greater than the provided batch number.
    async fn delete_batches_gt(&self, batch_number: u64) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", batch_number, "Deleting batches greater than batch number.");
        Ok(models::batch::Entity::delete_many()
            .filter(models::batch::Column::Number.gt(batch_number as i64))
            .exec(self.get_connection())
            .await
            .map(|_| ())?)
    }

    /// Insert a [`VirtualBatch`] into the database.
    async fn insert_virtual_batch(&self, batch: VirtualBatch) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", batch_number = batch.batch_number, "Inserting virtual batch into database.");
        let batch: models::virtual_batch::ActiveModel = batch.into();
        batch.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get a [`VirtualBatch`] from the database by its batch number.
    async fn get_virtual_batch_by_number(
        &self,
        batch_number: u64,
    ) -> Result<Option<VirtualBatch>, DatabaseError> {
        Ok(models::virtual_batch::Entity::find_by_id(
            TryInto::<i64>::try_into(batch_number).expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await
        .map(|x| x.map(Into::into))?)
    }

    /// Get the number of the last virtualized batch, or zero when no virtual batch exists.
    async fn get_last_virtual_batch_number(&self) -> Result<u64, DatabaseError> {
        Ok(models::virtual_batch::Entity::find()
            .order_by_desc(models::virtual_batch::Column::BatchNumber)
            .one(self.get_connection())
            .await?
            .map(|batch| VirtualBatch::from(batch).batch_number)
            .unwrap_or_default())
    }

    /// Delete all [`VirtualBatch`]es with a batch number greater than the provided batch number.
    async fn delete_virtual_batches_gt(&self, batch_number: u64) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", batch_number, "Deleting virtual batches greater than batch number.");
        Ok(models::virtual_batch::Entity::delete_many()
            .filter(models::virtual_batch::Column::BatchNumber.gt(batch_number as i64))
            .exec(self.get_connection())
            .await
            .map(|_| ())?)
    }

    /// Upsert a [`Sequence`] keyed by its starting batch number.
    ///
    /// A repeated sequence with the same start extends the stored end; the stored range is never
    /// shrunk.
    async fn upsert_sequence(&self, sequence: Sequence) -> Result<(), DatabaseError> {
        tracing::trace!(
            target: "zkevm::db",
            from = sequence.from_batch_number,
            to = sequence.to_batch_number,
            "Upserting sequence into database."
        );
        let existing = models::sequence::Entity::find_by_id(
            TryInto::<i64>::try_into(sequence.from_batch_number)
                .expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await?;

        if let Some(existing) = existing {
            let stored: Sequence = existing.into();
            if sequence.to_batch_number <= stored.to_batch_number {
                return Ok(());
            }
            let mut model: models::sequence::ActiveModel = stored.into();
            model.to_batch_number = Set(TryInto::<i64>::try_into(sequence.to_batch_number)
                .expect("batch number should fit in i64"));
            model.update(self.get_connection()).await?;
        } else {
            let model: models::sequence::ActiveModel = sequence.into();
            model.insert(self.get_connection()).await?;
        }
        Ok(())
    }

    /// Get a [`Sequence`] from the database by its starting batch number.
    async fn get_sequence_by_from(
        &self,
        from_batch_number: u64,
    ) -> Result<Option<Sequence>, DatabaseError> {
        Ok(models::sequence::Entity::find_by_id(
            TryInto::<i64>::try_into(from_batch_number).expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await
        .map(|x| x.map(Into::into))?)
    }

    /// Delete all [`Sequence`]s starting after the provided batch number.
    async fn delete_sequences_gt(&self, batch_number: u64) -> Result<(), DatabaseError> {
        Ok(models::sequence::Entity::delete_many()
            .filter(models::sequence::Column::FromBatchNumber.gt(batch_number as i64))
            .exec(self.get_connection())
            .await
            .map(|_| ())?)
    }

    /// Insert a [`ForcedBatch`] into the database. Re-inserting an already stored forced batch is
    /// a no-op.
    async fn insert_forced_batch(&self, batch: ForcedBatch) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", forced_batch_number = batch.forced_batch_number, "Inserting forced batch into database.");
        if models::forced_batch::Entity::find_by_id(
            TryInto::<i64>::try_into(batch.forced_batch_number)
                .expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await?
        .is_some()
        {
            return Ok(());
        }
        let batch: models::forced_batch::ActiveModel = batch.into();
        batch.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get the next queued [`ForcedBatch`], in strict forced batch number order.
    async fn get_next_forced_batch(&self) -> Result<Option<ForcedBatch>, DatabaseError> {
        Ok(models::forced_batch::Entity::find()
            .filter(models::forced_batch::Column::ConsumedByBatch.is_null())
            .order_by_asc(models::forced_batch::Column::ForcedBatchNumber)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Get the forced batch already consumed by the provided sequenced batch, if any.
    async fn get_forced_batch_consumed_by(
        &self,
        batch_number: u64,
    ) -> Result<Option<ForcedBatch>, DatabaseError> {
        Ok(models::forced_batch::Entity::find()
            .filter(models::forced_batch::Column::ConsumedByBatch.eq(batch_number as i64))
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Mark the forced batch with the provided number as consumed by the provided sequenced batch.
    async fn mark_forced_batch_consumed(
        &self,
        forced_batch_number: u64,
        consumed_by_batch: u64,
    ) -> Result<(), DatabaseError> {
        let batch = models::forced_batch::Entity::find_by_id(
            TryInto::<i64>::try_into(forced_batch_number).expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await?
        .ok_or(DatabaseError::ForcedBatchNotFound(forced_batch_number))?;
        let mut batch: models::forced_batch::ActiveModel = batch.into();
        batch.consumed_by_batch = Set(Some(
            consumed_by_batch.try_into().expect("batch number should fit in i64"),
        ));
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Release the consumption marker of all forced batches consumed by batches greater than the
    /// provided batch number, requeueing them for the rederived sequence.
    async fn release_forced_batches_consumed_gt(
        &self,
        batch_number: u64,
    ) -> Result<(), DatabaseError> {
        let consumed = models::forced_batch::Entity::find()
            .filter(models::forced_batch::Column::ConsumedByBatch.gt(batch_number as i64))
            .all(self.get_connection())
            .await?;
        for model in consumed {
            let mut model: models::forced_batch::ActiveModel = model.into();
            model.consumed_by_batch = Set(None);
            model.update(self.get_connection()).await?;
        }
        Ok(())
    }

    /// Insert a [`ForkIdInterval`] into the database.
    async fn insert_fork_id_interval(&self, interval: ForkIdInterval) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", fork_id = %interval.fork_id, "Inserting fork id interval into database.");
        let interval: models::fork_id_interval::ActiveModel = interval.into();
        interval.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get all stored [`ForkIdInterval`]s, in ascending fork id order.
    async fn get_fork_id_intervals(&self) -> Result<Vec<ForkIdInterval>, DatabaseError> {
        Ok(models::fork_id_interval::Entity::find()
            .order_by_asc(models::fork_id_interval::Column::ForkId)
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Resolve the fork id active for the provided batch number.
    async fn get_fork_id_by_batch_number(
        &self,
        batch_number: u64,
    ) -> Result<Option<ForkId>, DatabaseError> {
        Ok(self
            .get_fork_id_intervals()
            .await?
            .into_iter()
            .filter(|interval| interval.contains(batch_number))
            .map(|interval| interval.fork_id)
            .max())
    }

    /// Insert a [`TrustedReorg`] audit entry into the database.
    async fn insert_trusted_reorg(&self, reorg: TrustedReorg) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", batch_number = reorg.batch_number, "Inserting trusted reorg into database.");
        let reorg: models::trusted_reorg::ActiveModel = reorg.into();
        reorg.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get all [`TrustedReorg`] audit entries.
    async fn get_trusted_reorgs(&self) -> Result<Vec<TrustedReorg>, DatabaseError> {
        Ok(models::trusted_reorg::Entity::find()
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Upsert a [`VerifiedBatch`] into the database. A later verification of the same batch (e.g.
    /// the trusted aggregator confirming an earlier proof) replaces the stored record.
    async fn upsert_verified_batch(&self, batch: VerifiedBatch) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", batch_number = batch.batch_number, "Upserting verified batch into database.");
        let existing = models::verified_batch::Entity::find_by_id(
            TryInto::<i64>::try_into(batch.batch_number).expect("batch number should fit in i64"),
        )
        .one(self.get_connection())
        .await?;
        let model: models::verified_batch::ActiveModel = batch.into();
        if existing.is_some() {
            model.update(self.get_connection()).await?;
        } else {
            model.insert(self.get_connection()).await?;
        }
        Ok(())
    }

    /// Get the number of the last verified batch, or zero when no batch was verified.
    async fn get_last_verified_batch_number(&self) -> Result<u64, DatabaseError> {
        Ok(models::verified_batch::Entity::find()
            .order_by_desc(models::verified_batch::Column::BatchNumber)
            .one(self.get_connection())
            .await?
            .map(|batch| VerifiedBatch::from(batch).batch_number)
            .unwrap_or_default())
    }

    /// Insert a [`GlobalExitRootUpdate`] into the database.
    async fn insert_exit_root(&self, update: GlobalExitRootUpdate) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", block_number = update.block_number, "Inserting exit root into database.");
        let update: models::exit_root::ActiveModel = update.into();
        update.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get the latest stored [`GlobalExitRootUpdate`].
    async fn get_latest_exit_root(&self) -> Result<Option<GlobalExitRootUpdate>, DatabaseError> {
        Ok(models::exit_root::Entity::find()
            .order_by_desc(models::exit_root::Column::BlockNumber)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Insert an [`L1InfoTreeLeaf`] into the database. Re-inserting an already stored leaf is a
    /// no-op.
    async fn insert_l1_info_tree_leaf(&self, leaf: L1InfoTreeLeaf) -> Result<(), DatabaseError> {
        tracing::trace!(target: "zkevm::db", leaf_index = leaf.leaf_index, "Inserting L1 info tree leaf into database.");
        if models::l1_info_tree_leaf::Entity::find_by_id(
            TryInto::<i32>::try_into(leaf.leaf_index).expect("leaf index should fit in i32"),
        )
        .one(self.get_connection())
        .await?
        .is_some()
        {
            return Ok(());
        }
        let leaf: models::l1_info_tree_leaf::ActiveModel = leaf.into();
        leaf.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get an [`L1InfoTreeLeaf`] from the database by its index.
    async fn get_l1_info_leaf_by_index(
        &self,
        leaf_index: u32,
    ) -> Result<Option<L1InfoTreeLeaf>, DatabaseError> {
        Ok(models::l1_info_tree_leaf::Entity::find_by_id(
            TryInto::<i32>::try_into(leaf_index).expect("leaf index should fit in i32"),
        )
        .one(self.get_connection())
        .await
        .map(|x| x.map(Into::into))?)
    }

    /// Insert an L2 transaction into the database.
    async fn insert_l2_transaction(
        &self,
        transaction: PooledTransaction,
    ) -> Result<(), DatabaseError> {
        let transaction: models::l2_transaction::ActiveModel = transaction.into();
        transaction.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get all L2 transactions belonging to batches greater than the provided batch number.
    async fn get_transactions_above_batch(
        &self,
        batch_number: u64,
    ) -> Result<Vec<PooledTransaction>, DatabaseError> {
        Ok(models::l2_transaction::Entity::find()
            .filter(models::l2_transaction::Column::BatchNumber.gt(batch_number as i64))
            .order_by_asc(models::l2_transaction::Column::BatchNumber)
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Delete all L2 transactions belonging to batches greater than the provided batch number.
    async fn delete_transactions_above_batch(&self, batch_number: u64) -> Result<(), DatabaseError> {
        Ok(models::l2_transaction::Entity::delete_many()
            .filter(models::l2_transaction::Column::BatchNumber.gt(batch_number as i64))
            .exec(self.get_connection())
            .await
            .map(|_| ())?)
    }

    /// Insert a locally synced L2 block into the database.
    async fn insert_l2_block(&self, number: u64, hash: B256) -> Result<(), DatabaseError> {
        let block: models::l2_block::ActiveModel = (number, hash).into();
        block.insert(self.get_connection()).await?;
        Ok(())
    }

    /// Get the hash of the locally synced L2 block with the provided number.
    async fn get_l2_block_hash(&self, number: u64) -> Result<Option<B256>, DatabaseError> {
        Ok(models::l2_block::Entity::find_by_id(
            TryInto::<i64>::try_into(number).expect("block number should fit in i64"),
        )
        .one(self.get_connection())
        .await?
        .map(|block| block.hash()))
    }

    /// Get the number of the last locally synced L2 block, or zero when no block exists.
    async fn get_last_l2_block_number(&self) -> Result<u64, DatabaseError> {
        Ok(models::l2_block::Entity::find()
            .order_by_desc(models::l2_block::Column::Number)
            .one(self.get_connection())
            .await?
            .map(|block| block.number())
            .unwrap_or_default())
    }

    /// Discard all trusted state for batch numbers greater than the provided batch number.
    ///
    /// Removes trusted batches, their L1 commitments, the sequences starting above the boundary
    /// and the transactions the discarded batches contained, and requeues forced batches the
    /// discarded batches had consumed.
    async fn reset_trusted_state_gt(&self, batch_number: u64) -> Result<(), DatabaseError> {
        tracing::debug!(target: "zkevm::db", batch_number, "Resetting trusted state above batch number.");
        self.delete_batches_gt(batch_number).await?;
        self.delete_virtual_batches_gt(batch_number).await?;
        self.delete_sequences_gt(batch_number).await?;
        self.delete_transactions_above_batch(batch_number).await?;
        self.release_forced_batches_consumed_gt(batch_number).await
    }
}

impl<T> DatabaseOperations for T where T: DatabaseConnectionProvider {}
