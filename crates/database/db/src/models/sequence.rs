use sea_orm::{entity::prelude::*, ActiveValue};
use zkevm_node_primitives::Sequence;

/// A database model that represents a sequenced batch range.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sequence")]
pub struct Model {
    #[sea_orm(primary_key)]
    from_batch_number: i64,
    to_batch_number: i64,
}

/// The relation for the sequence model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the sequence model.
impl ActiveModelBehavior for ActiveModel {}

impl From<Sequence> for ActiveModel {
    fn from(sequence: Sequence) -> Self {
        Self {
            from_batch_number: ActiveValue::Set(
                sequence.from_batch_number.try_into().expect("batch number should fit in i64"),
            ),
            to_batch_number: ActiveValue::Set(
                sequence.to_batch_number.try_into().expect("batch number should fit in i64"),
            ),
        }
    }
}

impl From<Model> for Sequence {
    fn from(value: Model) -> Self {
        Self {
            from_batch_number: value.from_batch_number as u64,
            to_batch_number: value.to_batch_number as u64,
        }
    }
}
