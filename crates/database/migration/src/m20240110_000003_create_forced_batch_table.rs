use sea_orm_migration::{prelude::*, schema::*};

const HASH_LENGTH: u32 = 32;
const ADDRESS_LENGTH: u32 = 20;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForcedBatch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForcedBatch::ForcedBatchNumber)
                            .big_unsigned()
                            .not_null()
                            .primary_key(),
                    )
                    .col(binary_len(ForcedBatch::GlobalExitRoot, HASH_LENGTH))
                    .col(binary(ForcedBatch::RawTxData))
                    .col(binary_len(ForcedBatch::Sequencer, ADDRESS_LENGTH))
                    .col(big_unsigned(ForcedBatch::ForcedAt))
                    .col(big_unsigned(ForcedBatch::BlockNumber))
                    .col(big_unsigned_null(ForcedBatch::ConsumedByBatch))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ForcedBatch::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ForcedBatch {
    Table,
    ForcedBatchNumber,
    GlobalExitRoot,
    RawTxData,
    Sequencer,
    ForcedAt,
    BlockNumber,
    ConsumedByBatch,
}
