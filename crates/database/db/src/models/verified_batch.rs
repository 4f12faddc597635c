use alloy_primitives::{Address, B256};
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::VerifiedBatch;

/// A database model that represents a verified batch.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "verified_batch")]
pub struct Model {
    #[sea_orm(primary_key)]
    batch_number: i64,
    block_number: i64,
    aggregator: Vec<u8>,
    state_root: Vec<u8>,
    l1_tx_hash: Vec<u8>,
    is_trusted: bool,
}

/// The relation for the verified batch model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the verified batch model.
impl ActiveModelBehavior for ActiveModel {}

impl From<VerifiedBatch> for ActiveModel {
    fn from(batch: VerifiedBatch) -> Self {
        Self {
            batch_number: ActiveValue::Set(
                batch.batch_number.try_into().expect("batch number should fit in i64"),
            ),
            block_number: ActiveValue::Set(
                batch.block_number.try_into().expect("block number should fit in i64"),
            ),
            aggregator: ActiveValue::Set(batch.aggregator.to_vec()),
            state_root: ActiveValue::Set(batch.state_root.to_vec()),
            l1_tx_hash: ActiveValue::Set(batch.l1_tx_hash.to_vec()),
            is_trusted: ActiveValue::Set(batch.is_trusted),
        }
    }
}

impl From<Model> for VerifiedBatch {
    fn from(value: Model) -> Self {
        Self {
            batch_number: value.batch_number as u64,
            block_number: value.block_number as u64,
            aggregator: Address::from_slice(&value.aggregator),
            state_root: B256::from_slice(&value.state_root),
            l1_tx_hash: B256::from_slice(&value.l1_tx_hash),
            is_trusted: value.is_trusted,
        }
    }
}
