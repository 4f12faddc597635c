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
                    .table(Batch::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Batch::Number).big_unsigned().not_null().primary_key())
                    .col(binary_len(Batch::Coinbase, ADDRESS_LENGTH))
                    .col(big_unsigned(Batch::Timestamp))
                    .col(binary_len(Batch::GlobalExitRoot, HASH_LENGTH))
                    .col(binary(Batch::L2Data))
                    .col(binary_len(Batch::StateRoot, HASH_LENGTH))
                    .col(binary_len(Batch::LocalExitRoot, HASH_LENGTH))
                    .col(binary_len(Batch::AccInputHash, HASH_LENGTH))
                    .col(big_unsigned_null(Batch::ForcedBatchNumber))
                    .col(boolean(Batch::Wip))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VirtualBatch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VirtualBatch::BatchNumber)
                            .big_unsigned()
                            .not_null()
                            .primary_key(),
                    )
                    .col(binary_len(VirtualBatch::L1TxHash, HASH_LENGTH))
                    .col(big_unsigned(VirtualBatch::BlockNumber))
                    .col(binary_len(VirtualBatch::Sequencer, ADDRESS_LENGTH))
                    .col(binary_len_null(VirtualBatch::L1InfoRoot, HASH_LENGTH))
                    .col(big_unsigned_null(VirtualBatch::TimestampBatchEtrog))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sequence::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sequence::FromBatchNumber)
                            .big_unsigned()
                            .not_null()
                            .primary_key(),
                    )
                    .col(big_unsigned(Sequence::ToBatchNumber))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Sequence::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(VirtualBatch::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Batch::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Batch {
    Table,
    Number,
    Coinbase,
    Timestamp,
    GlobalExitRoot,
    L2Data,
    StateRoot,
    LocalExitRoot,
    AccInputHash,
    ForcedBatchNumber,
    Wip,
}

#[derive(DeriveIden)]
enum VirtualBatch {
    Table,
    BatchNumber,
    L1TxHash,
    BlockNumber,
    Sequencer,
    L1InfoRoot,
    TimestampBatchEtrog,
}

#[derive(DeriveIden)]
enum Sequence {
    Table,
    FromBatchNumber,
    ToBatchNumber,
}
