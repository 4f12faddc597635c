use alloy_primitives::B256;
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::{BlockInfo, L1BlockWithEvents};

/// A database model that represents a processed L1 block.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l1_block")]
pub struct Model {
    #[sea_orm(primary_key)]
    number: i64,
    hash: Vec<u8>,
    parent_hash: Vec<u8>,
    timestamp: i64,
    received_at: i64,
}

impl Model {
    pub(crate) fn block_info(&self) -> BlockInfo {
        BlockInfo { number: self.number as u64, hash: B256::from_slice(&self.hash) }
    }
}

/// The relation for the L1 block model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the L1 block model.
impl ActiveModelBehavior for ActiveModel {}

impl From<&L1BlockWithEvents> for ActiveModel {
    fn from(block: &L1BlockWithEvents) -> Self {
        Self {
            number: ActiveValue::Set(
                block.number.try_into().expect("block number should fit in i64"),
            ),
            hash: ActiveValue::Set(block.hash.to_vec()),
            parent_hash: ActiveValue::Set(block.parent_hash.to_vec()),
            timestamp: ActiveValue::Set(
                block.timestamp.try_into().expect("timestamp should fit in i64"),
            ),
            received_at: ActiveValue::Set(
                block.received_at.try_into().expect("timestamp should fit in i64"),
            ),
        }
    }
}
