use sea_orm_migration::{prelude::*, schema::*};

const HASH_LENGTH: u32 = 32;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(L1Block::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(L1Block::Number).big_unsigned().not_null().primary_key())
                    .col(binary_len(L1Block::Hash, HASH_LENGTH))
                    .col(binary_len(L1Block::ParentHash, HASH_LENGTH))
                    .col(big_unsigned(L1Block::Timestamp))
                    .col(big_unsigned(L1Block::ReceivedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(L1Block::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum L1Block {
    Table,
    Number,
    Hash,
    ParentHash,
    Timestamp,
    ReceivedAt,
}
