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
                    .table(ExitRoot::Table)
                    .if_not_exists()
                    .col(pk_auto(ExitRoot::Id))
                    .col(big_unsigned(ExitRoot::BlockNumber))
                    .col(big_unsigned(ExitRoot::Timestamp))
                    .col(binary_len(ExitRoot::MainnetExitRoot, HASH_LENGTH))
                    .col(binary_len(ExitRoot::RollupExitRoot, HASH_LENGTH))
                    .col(binary_len(ExitRoot::GlobalExitRoot, HASH_LENGTH))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(L1InfoTreeLeaf::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(L1InfoTreeLeaf::LeafIndex)
                            .unsigned()
                            .not_null()
                            .primary_key(),
                    )
                    .col(binary_len(L1InfoTreeLeaf::GlobalExitRoot, HASH_LENGTH))
                    .col(binary_len(L1InfoTreeLeaf::MainnetExitRoot, HASH_LENGTH))
                    .col(binary_len(L1InfoTreeLeaf::RollupExitRoot, HASH_LENGTH))
                    .col(binary_len(L1InfoTreeLeaf::PreviousBlockHash, HASH_LENGTH))
                    .col(big_unsigned(L1InfoTreeLeaf::Timestamp))
                    .col(big_unsigned(L1InfoTreeLeaf::BlockNumber))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(L1InfoTreeLeaf::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ExitRoot::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ExitRoot {
    Table,
    Id,
    BlockNumber,
    Timestamp,
    MainnetExitRoot,
    RollupExitRoot,
    GlobalExitRoot,
}

#[derive(DeriveIden)]
enum L1InfoTreeLeaf {
    Table,
    LeafIndex,
    GlobalExitRoot,
    MainnetExitRoot,
    RollupExitRoot,
    PreviousBlockHash,
    Timestamp,
    BlockNumber,
}
