use alloy_primitives::B256;
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::PooledTransaction;

/// A database model that represents an L2 transaction keyed by its batch.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l2_transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    hash: Vec<u8>,
    batch_number: i64,
    encoded: Vec<u8>,
}

/// The relation for the L2 transaction model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the L2 transaction model.
impl ActiveModelBehavior for ActiveModel {}

impl From<PooledTransaction> for ActiveModel {
    fn from(transaction: PooledTransaction) -> Self {
        Self {
            hash: ActiveValue::Set(transaction.hash.to_vec()),
            batch_number: ActiveValue::Set(
                transaction.batch_number.try_into().expect("batch number should fit in i64"),
            ),
            encoded: ActiveValue::Set(transaction.encoded.to_vec()),
        }
    }
}

impl From<Model> for PooledTransaction {
    fn from(value: Model) -> Self {
        Self {
            hash: B256::from_slice(&value.hash),
            batch_number: value.batch_number as u64,
            encoded: value.encoded.into(),
        }
    }
}
