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
                    .table(TrustedReorg::Table)
                    .if_not_exists()
                    .col(pk_auto(TrustedReorg::Id))
                    .col(big_unsigned(TrustedReorg::BatchNumber))
                    .col(text(TrustedReorg::Reason))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VerifiedBatch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerifiedBatch::BatchNumber)
                            .big_unsigned()
                            .not_null()
                            .primary_key(),
                    )
                    .col(big_unsigned(VerifiedBatch::BlockNumber))
                    .col(binary_len(VerifiedBatch::Aggregator, ADDRESS_LENGTH))
                    .col(binary_len(VerifiedBatch::StateRoot, HASH_LENGTH))
                    .col(binary_len(VerifiedBatch::L1TxHash, HASH_LENGTH))
                    .col(boolean(VerifiedBatch::IsTrusted))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(VerifiedBatch::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(TrustedReorg::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TrustedReorg {
    Table,
    Id,
    BatchNumber,
    Reason,
}

#[derive(DeriveIden)]
enum VerifiedBatch {
    Table,
    BatchNumber,
    BlockNumber,
    Aggregator,
    StateRoot,
    L1TxHash,
    IsTrusted,
}
