use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecurityGroupCvmRel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SecurityGroupCvmRel::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(SecurityGroupCvmRel::CvmId, 64))
                    .col(string_len(SecurityGroupCvmRel::SecurityGroupId, 64))
                    .col(string_len(SecurityGroupCvmRel::Creator, 64))
                    .col(timestamp_with_time_zone(SecurityGroupCvmRel::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SecurityGroupCvmRel::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SecurityGroupCvmRel { Table, Id, CvmId, SecurityGroupId, Creator, CreatedAt }
