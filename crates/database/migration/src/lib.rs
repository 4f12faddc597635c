pub use sea_orm_migration::prelude::*;

mod m20240110_000001_create_l1_block_table;
mod m20240110_000002_create_batch_tables;
mod m20240110_000003_create_forced_batch_table;
mod m20240110_000004_create_fork_id_interval_table;
mod m20240110_000005_create_exit_root_tables;
mod m20240110_000006_create_audit_tables;
mod m20240110_000007_create_l2_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240110_000001_create_l1_block_table::Migration),
            Box::new(m20240110_000002_create_batch_tables::Migration),
            Box::new(m20240110_000003_create_forced_batch_table::Migration),
            Box::new(m20240110_000004_create_fork_id_interval_table::Migration),
            Box::new(m20240110_000005_create_exit_root_tables::Migration),
            Box::new(m20240110_000006_create_audit_tables::Migration),
            Box::new(m20240110_000007_create_l2_tables::Migration),
        ]
    }
}
