use alloy_primitives::B256;
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::GlobalExitRootUpdate;

/// A database model that represents a global exit root update.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exit_root")]
pub struct Model {
    #[sea_orm(primary_key)]
    id: i32,
    block_number: i64,
    timestamp: i64,
    mainnet_exit_root: Vec<u8>,
    rollup_exit_root: Vec<u8>,
    global_exit_root: Vec<u8>,
}

/// The relation for the exit root model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the exit root model.
impl ActiveModelBehavior for ActiveModel {}

impl From<GlobalExitRootUpdate> for ActiveModel {
    fn from(update: GlobalExitRootUpdate) -> Self {
        Self {
            id: ActiveValue::NotSet,
            block_number: ActiveValue::Set(
                update.block_number.try_into().expect("block number should fit in i64"),
            ),
            timestamp: ActiveValue::Set(
                update.timestamp.try_into().expect("timestamp should fit in i64"),
            ),
            mainnet_exit_root: ActiveValue::Set(update.mainnet_exit_root.to_vec()),
            rollup_exit_root: ActiveValue::Set(update.rollup_exit_root.to_vec()),
            global_exit_root: ActiveValue::Set(update.global_exit_root.to_vec()),
        }
    }
}

impl From<Model> for GlobalExitRootUpdate {
    fn from(value: Model) -> Self {
        Self {
            block_number: value.block_number as u64,
            timestamp: value.timestamp as u64,
            mainnet_exit_root: B256::from_slice(&value.mainnet_exit_root),
            rollup_exit_root: B256::from_slice(&value.rollup_exit_root),
            global_exit_root: B256::from_slice(&value.global_exit_root),
        }
    }
}
