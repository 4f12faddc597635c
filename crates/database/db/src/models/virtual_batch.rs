use alloy_primitives::{Address, B256};
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::VirtualBatch;

/// A database model that represents the L1 commitment record for a batch.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "virtual_batch")]
pub struct Model {
    #[sea_orm(primary_key)]
    batch_number: i64,
    l1_tx_hash: Vec<u8>,
    block_number: i64,
    sequencer: Vec<u8>,
    l1_info_root: Option<Vec<u8>>,
    timestamp_batch_etrog: Option<i64>,
}

/// The relation for the virtual batch model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the virtual batch model.
impl ActiveModelBehavior for ActiveModel {}

impl From<VirtualBatch> for ActiveModel {
    fn from(batch: VirtualBatch) -> Self {
        Self {
            batch_number: ActiveValue::Set(
                batch.batch_number.try_into().expect("batch number should fit in i64"),
            ),
            l1_tx_hash: ActiveValue::Set(batch.l1_tx_hash.to_vec()),
            block_number: ActiveValue::Set(
                batch.block_number.try_into().expect("block number should fit in i64"),
            ),
            sequencer: ActiveValue::Set(batch.sequencer.to_vec()),
            l1_info_root: ActiveValue::Set(batch.l1_info_root.map(|r| r.to_vec())),
            timestamp_batch_etrog: ActiveValue::Set(
                batch
                    .timestamp_batch_etrog
                    .map(|t| t.try_into().expect("timestamp should fit in i64")),
            ),
        }
    }
}

impl From<Model> for VirtualBatch {
    fn from(value: Model) -> Self {
        Self {
            batch_number: value.batch_number as u64,
            l1_tx_hash: B256::from_slice(&value.l1_tx_hash),
            block_number: value.block_number as u64,
            sequencer: Address::from_slice(&value.sequencer),
            l1_info_root: value.l1_info_root.map(|r| B256::from_slice(&r)),
            timestamp_batch_etrog: value.timestamp_batch_etrog.map(|t| t as u64),
        }
    }
}
