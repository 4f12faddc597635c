use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::TrustedReorg;

/// A database model that represents a trusted reorg audit entry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trusted_reorg")]
pub struct Model {
    #[sea_orm(primary_key)]
    id: i32,
    batch_number: i64,
    reason: String,
}

/// The relation for the trusted reorg model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the trusted reorg model.
impl ActiveModelBehavior for ActiveModel {}

impl From<TrustedReorg> for ActiveModel {
    fn from(reorg: TrustedReorg) -> Self {
        Self {
            id: ActiveValue::NotSet,
            batch_number: ActiveValue::Set(
                reorg.batch_number.try_into().expect("batch number should fit in i64"),
            ),
            reason: ActiveValue::Set(reorg.reason),
        }
    }
}

impl From<Model> for TrustedReorg {
    fn from(value: Model) -> Self {
        Self { batch_number: value.batch_number as u64, reason: value.reason }
    }
}
