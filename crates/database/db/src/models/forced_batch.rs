use alloy_primitives::{Address, B256};
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::ForcedBatch;

/// A database model that represents a forced batch.
///
/// The `consumed_by_batch` column records the sequenced batch that consumed the forced batch;
/// `None` means the forced batch is still queued.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "forced_batch")]
pub struct Model {
    #[sea_orm(primary_key)]
    forced_batch_number: i64,
    global_exit_root: Vec<u8>,
    raw_tx_data: Vec<u8>,
    sequencer: Vec<u8>,
    forced_at: i64,
    block_number: i64,
    pub(crate) consumed_by_batch: Option<i64>,
}

/// The relation for the forced batch model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the forced batch model.
impl ActiveModelBehavior for ActiveModel {}

impl From<ForcedBatch> for ActiveModel {
    fn from(batch: ForcedBatch) -> Self {
        Self {
            forced_batch_number: ActiveValue::Set(
                batch.forced_batch_number.try_into().expect("batch number should fit in i64"),
            ),
            global_exit_root: ActiveValue::Set(batch.global_exit_root.to_vec()),
            raw_tx_data: ActiveValue::Set(batch.raw_tx_data.to_vec()),
            sequencer: ActiveValue::Set(batch.sequencer.to_vec()),
            forced_at: ActiveValue::Set(
                batch.forced_at.try_into().expect("timestamp should fit in i64"),
            ),
            block_number: ActiveValue::Set(
                batch.block_number.try_into().expect("block number should fit in i64"),
            ),
            consumed_by_batch: ActiveValue::Set(None),
        }
    }
}

impl From<Model> for ForcedBatch {
    fn from(value: Model) -> Self {
        Self {
            forced_batch_number: value.forced_batch_number as u64,
            global_exit_root: B256::from_slice(&value.global_exit_root),
            raw_tx_data: value.raw_tx_data.into(),
            sequencer: Address::from_slice(&value.sequencer),
            forced_at: value.forced_at as u64,
            block_number: value.block_number as u64,
        }
    }
}
