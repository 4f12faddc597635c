use alloy_primitives::B256;
use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::L1InfoTreeLeaf;

/// A database model that represents an L1 info tree leaf.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l1_info_tree_leaf")]
pub struct Model {
    #[sea_orm(primary_key)]
    leaf_index: i32,
    global_exit_root: Vec<u8>,
    mainnet_exit_root: Vec<u8>,
    rollup_exit_root: Vec<u8>,
    previous_block_hash: Vec<u8>,
    timestamp: i64,
    block_number: i64,
}

/// The relation for the L1 info tree leaf model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the L1 info tree leaf model.
impl ActiveModelBehavior for ActiveModel {}

impl From<L1InfoTreeLeaf> for ActiveModel {
    fn from(leaf: L1InfoTreeLeaf) -> Self {
        Self {
            leaf_index: ActiveValue::Set(
                leaf.leaf_index.try_into().expect("leaf index should fit in i32"),
            ),
            global_exit_root: ActiveValue::Set(leaf.global_exit_root.to_vec()),
            mainnet_exit_root: ActiveValue::Set(leaf.mainnet_exit_root.to_vec()),
            rollup_exit_root: ActiveValue::Set(leaf.rollup_exit_root.to_vec()),
            previous_block_hash: ActiveValue::Set(leaf.previous_block_hash.to_vec()),
            timestamp: ActiveValue::Set(
                leaf.timestamp.try_into().expect("timestamp should fit in i64"),
            ),
            block_number: ActiveValue::Set(
                leaf.block_number.try_into().expect("block number should fit in i64"),
            ),
        }
    }
}

impl From<Model> for L1InfoTreeLeaf {
    fn from(value: Model) -> Self {
        Self {
            leaf_index: value.leaf_index as u32,
            global_exit_root: B256::from_slice(&value.global_exit_root),
            mainnet_exit_root: B256::from_slice(&value.mainnet_exit_root),
            rollup_exit_root: B256::from_slice(&value.rollup_exit_root),
            previous_block_hash: B256::from_slice(&value.previous_block_hash),
            timestamp: value.timestamp as u64,
            block_number: value.block_number as u64,
        }
    }
}
