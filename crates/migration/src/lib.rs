//! Migrator registering entity tables first, relation tables after them.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20230101_000001_create_disk;
mod m20230101_000002_create_security_group;
mod m20230101_000003_create_disk_cvm_rel;
mod m20230101_000004_create_security_group_cvm_rel;
mod m20230101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230101_000001_create_disk::Migration),
            Box::new(m20230101_000002_create_security_group::Migration),
            Box::new(m20230101_000003_create_disk_cvm_rel::Migration),
            Box::new(m20230101_000004_create_security_group_cvm_rel::Migration),
            // Indexes should always be applied last
            Box::new(m20230101_000005_add_indexes::Migration),
        ]
    }
}
