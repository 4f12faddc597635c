use alloy_primitives::{Address, B256};
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::Batch;

/// A database model that represents a trusted batch.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "batch")]
pub struct Model {
    #[sea_orm(primary_key)]
    number: i64,
    coinbase: Vec<u8>,
    timestamp: i64,
    global_exit_root: Vec<u8>,
    l2_data: Vec<u8>,
    state_root: Vec<u8>,
    local_exit_root: Vec<u8>,
    acc_input_hash: Vec<u8>,
    forced_batch_number: Option<i64>,
    wip: bool,
}

/// The relation for the batch model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the batch model.
impl ActiveModelBehavior for ActiveModel {}

impl From<Batch> for ActiveModel {
    fn from(batch: Batch) -> Self {
        Self {
            number: ActiveValue::Set(
                batch.number.try_into().expect("batch number should fit in i64"),
            ),
            coinbase: ActiveValue::Set(batch.coinbase.to_vec()),
            timestamp: ActiveValue::Set(
                batch.timestamp.try_into().expect("timestamp should fit in i64"),
            ),
            global_exit_root: ActiveValue::Set(batch.global_exit_root.to_vec()),
            l2_data: ActiveValue::Set(batch.l2_data.to_vec()),
            state_root: ActiveValue::Set(batch.state_root.to_vec()),
            local_exit_root: ActiveValue::Set(batch.local_exit_root.to_vec()),
            acc_input_hash: ActiveValue::Set(batch.acc_input_hash.to_vec()),
            forced_batch_number: ActiveValue::Set(
                batch
                    .forced_batch_number
                    .map(|n| n.try_into().expect("forced batch number should fit in i64")),
            ),
            wip: ActiveValue::Set(batch.wip),
        }
    }
}

impl From<Model> for Batch {
    fn from(value: Model) -> Self {
        Self {
            number: value.number as u64,
            coinbase: Address::from_slice(&value.coinbase),
            timestamp: value.timestamp as u64,
            global_exit_root: B256::from_slice(&value.global_exit_root),
            l2_data: value.l2_data.into(),
            state_root: B256::from_slice(&value.state_root),
            local_exit_root: B256::from_slice(&value.local_exit_root),
            acc_input_hash: B256::from_slice(&value.acc_input_hash),
            forced_batch_number: value.forced_batch_number.map(|n| n as u64),
            wip: value.wip,
        }
    }
}
