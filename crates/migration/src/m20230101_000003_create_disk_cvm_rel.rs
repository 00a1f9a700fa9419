use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiskCvmRel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiskCvmRel::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(DiskCvmRel::DiskId, 64))
                    .col(string_len(DiskCvmRel::CvmId, 64))
                    .col(string_len(DiskCvmRel::Creator, 64))
                    .col(timestamp_with_time_zone(DiskCvmRel::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(DiskCvmRel::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum DiskCvmRel { Table, Id, DiskId, CvmId, Creator, CreatedAt }
