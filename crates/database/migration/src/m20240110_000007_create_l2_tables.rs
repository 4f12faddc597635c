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
                    .table(L2Transaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(L2Transaction::Hash)
                            .binary_len(HASH_LENGTH)
                            .not_null()
                            .primary_key(),
                    )
                    .col(big_unsigned(L2Transaction::BatchNumber))
                    .col(binary(L2Transaction::Encoded))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(L2Block::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(L2Block::Number).big_unsigned().not_null().primary_key())
                    .col(binary_len(L2Block::Hash, HASH_LENGTH))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(L2Block::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(L2Transaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum L2Transaction {
    Table,
    Hash,
    BatchNumber,
    Encoded,
}

#[derive(DeriveIden)]
enum L2Block {
    Table,
    Number,
    Hash,
}
