use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::{ForkId, ForkIdInterval};

/// A database model that represents a fork id interval.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fork_id_interval")]
pub struct Model {
    #[sea_orm(primary_key)]
    fork_id: i64,
    from_batch_number: i64,
    to_batch_number: i64,
    version: String,
    block_number: i64,
}

/// The relation for the fork id interval model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the fork id interval model.
impl ActiveModelBehavior for ActiveModel {}

impl From<ForkIdInterval> for ActiveModel {
    fn from(interval: ForkIdInterval) -> Self {
        Self {
            fork_id: ActiveValue::Set(
                interval.fork_id.0.try_into().expect("fork id should fit in i64"),
            ),
            from_batch_number: ActiveValue::Set(
                interval.from_batch_number.try_into().expect("batch number should fit in i64"),
            ),
            // The unbounded upper end is stored as i64::MAX, the widest value the column takes.
            to_batch_number: ActiveValue::Set(
                interval.to_batch_number.try_into().unwrap_or(i64::MAX),
            ),
            version: ActiveValue::Set(interval.version),
            block_number: ActiveValue::Set(
                interval.block_number.try_into().expect("block number should fit in i64"),
            ),
        }
    }
}

impl From<Model> for ForkIdInterval {
    fn from(value: Model) -> Self {
        Self {
            from_batch_number: value.from_batch_number as u64,
            to_batch_number: if value.to_batch_number == i64::MAX {
                u64::MAX
            } else {
                value.to_batch_number as u64
            },
            fork_id: ForkId(value.fork_id as u64),
            version: value.version,
            block_number: value.block_number as u64,
        }
    }
}
