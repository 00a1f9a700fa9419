use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecurityGroup::Table)
                    .if_not_exists()
                    .col(string_len(SecurityGroup::Id, 64).primary_key())
                    .col(string_len(SecurityGroup::Vendor, 16))
                    .col(string_len(SecurityGroup::CloudId, 255))
                    .col(string_len(SecurityGroup::Region, 64))
                    .col(string_len(SecurityGroup::Name, 255))
                    .col(string_len_null(SecurityGroup::Memo, 255))
                    .col(string_len(SecurityGroup::AccountId, 64))
                    .col(big_integer(SecurityGroup::BkBizId).default(-1))
                    .col(string_len(SecurityGroup::Creator, 64))
                    .col(string_len(SecurityGroup::Reviser, 64))
                    .col(timestamp_with_time_zone(SecurityGroup::CreatedAt))
                    .col(timestamp_with_time_zone(SecurityGroup::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SecurityGroup::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SecurityGroup {
    Table,
    Id,
    Vendor,
    CloudId,
    Region,
    Name,
    Memo,
    AccountId,
    BkBizId,
    Creator,
    Reviser,
    CreatedAt,
    UpdatedAt,
}
