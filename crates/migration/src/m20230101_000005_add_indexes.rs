use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // DiskCvmRel: one row per (disk, cvm) pair
        manager
            .create_index(
                Index::create()
                    .name("uniq_disk_cvm_rel_disk_cvm")
                    .table(DiskCvmRel::Table)
                    .col(DiskCvmRel::DiskId)
                    .col(DiskCvmRel::CvmId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_disk_cvm_rel_cvm")
                    .table(DiskCvmRel::Table)
                    .col(DiskCvmRel::CvmId)
                    .to_owned(),
            )
            .await?;

        // SecurityGroupCvmRel: one row per (security group, cvm) pair
        manager
            .create_index(
                Index::create()
                    .name("uniq_sg_cvm_rel_sg_cvm")
                    .table(SecurityGroupCvmRel::Table)
                    .col(SecurityGroupCvmRel::SecurityGroupId)
                    .col(SecurityGroupCvmRel::CvmId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_sg_cvm_rel_cvm")
                    .table(SecurityGroupCvmRel::Table)
                    .col(SecurityGroupCvmRel::CvmId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_disk_cvm_rel_disk_cvm").table(DiskCvmRel::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_disk_cvm_rel_cvm").table(DiskCvmRel::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_sg_cvm_rel_sg_cvm").table(SecurityGroupCvmRel::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_sg_cvm_rel_cvm").table(SecurityGroupCvmRel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DiskCvmRel { Table, DiskId, CvmId }

#[derive(DeriveIden)]
enum SecurityGroupCvmRel { Table, SecurityGroupId, CvmId }
