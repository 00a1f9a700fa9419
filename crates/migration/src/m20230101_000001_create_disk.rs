use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Disk::Table)
                    .if_not_exists()
                    .col(string_len(Disk::Id, 64).primary_key())
                    .col(string_len(Disk::Vendor, 16))
                    .col(string_len(Disk::AccountId, 64))
                    .col(string_len(Disk::CloudId, 255))
                    .col(big_integer(Disk::BkBizId).default(-1))
                    .col(string_len(Disk::Name, 255))
                    .col(string_len(Disk::Region, 64))
                    .col(string_len(Disk::Zone, 64))
                    .col(big_integer(Disk::DiskSize))
                    .col(string_len(Disk::DiskType, 64))
                    .col(string_len(Disk::Status, 32))
                    .col(string_len(Disk::RecycleStatus, 32))
                    .col(string_len_null(Disk::Memo, 255))
                    .col(string_len(Disk::Creator, 64))
                    .col(string_len(Disk::Reviser, 64))
                    .col(timestamp_with_time_zone(Disk::CreatedAt))
                    .col(timestamp_with_time_zone(Disk::UpdatedAt))
                    .col(text(Disk::Extension))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Disk::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Disk {
    Table,
    Id,
    Vendor,
    AccountId,
    CloudId,
    BkBizId,
    Name,
    Region,
    Zone,
    DiskSize,
    DiskType,
    Status,
    RecycleStatus,
    Memo,
    Creator,
    Reviser,
    CreatedAt,
    UpdatedAt,
    Extension,
}
