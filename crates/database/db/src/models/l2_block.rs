use alloy_primitives::B256;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a locally synced L2 block.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l2_block")]
pub struct Model {
    #[sea_orm(primary_key)]
    number: i64,
    hash: Vec<u8>,
}

impl Model {
    pub(crate) fn hash(&self) -> B256 {
        B256::from_slice(&self.hash)
    }

    pub(crate) const fn number(&self) -> u64 {
        self.number as u64
    }
}

/// The relation for the L2 block model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the L2 block model.
impl ActiveModelBehavior for ActiveModel {}

impl From<(u64, B256)> for ActiveModel {
    fn from((number, hash): (u64, B256)) -> Self {
        Self {
            number: ActiveValue::Set(number.try_into().expect("block number should fit in i64")),
            hash: ActiveValue::Set(hash.to_vec()),
        }
    }
}
