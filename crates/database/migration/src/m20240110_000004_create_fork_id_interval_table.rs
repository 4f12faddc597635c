use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForkIdInterval::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForkIdInterval::ForkId)
                            .big_unsigned()
                            .not_null()
                            .primary_key(),
                    )
                    .col(big_unsigned(ForkIdInterval::FromBatchNumber))
                    .col(big_unsigned(ForkIdInterval::ToBatchNumber))
                    .col(text(ForkIdInterval::Version))
                    .col(big_unsigned(ForkIdInterval::BlockNumber))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ForkIdInterval::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ForkIdInterval {
    Table,
    ForkId,
    FromBatchNumber,
    ToBatchNumber,
    Version,
    BlockNumber,
}
