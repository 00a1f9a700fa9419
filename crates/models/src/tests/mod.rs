//! Store-level behaviour of the relation tables, run on in-memory sqlite.

use anyhow::Result;
use chrono::Utc;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::db::connect_with_config;
use crate::{disk, disk_cvm_rel, security_group_cvm_rel};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn disk_row(id: &str) -> disk::ActiveModel {
    let now = Utc::now();
    disk::ActiveModel {
        id: Set(id.to_string()),
        vendor: Set("tcloud".into()),
        account_id: Set("account-1".into()),
        cloud_id: Set(format!("cloud-{id}")),
        bk_biz_id: Set(-1),
        name: Set(format!("name-{id}")),
        region: Set("ap-guangzhou".into()),
        zone: Set("ap-guangzhou-1".into()),
        disk_size: Set(50),
        disk_type: Set("CLOUD_PREMIUM".into()),
        status: Set("ATTACHED".into()),
        recycle_status: Set("".into()),
        memo: Set(None),
        creator: Set("admin".into()),
        reviser: Set("admin".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        extension: Set("{}".into()),
    }
}

#[tokio::test]
async fn insert_assigns_increasing_ids() -> Result<()> {
    let db = setup_test_db().await?;
    let a = disk_cvm_rel::new_rel("disk-1", "cvm-1", "alice").insert(&db).await?;
    let b = disk_cvm_rel::new_rel("disk-2", "cvm-1", "alice").insert(&db).await?;
    assert!(b.id > a.id);
    assert_eq!(a.creator, "alice");
    Ok(())
}

#[tokio::test]
async fn duplicate_pair_violates_unique_index() -> Result<()> {
    let db = setup_test_db().await?;
    disk_cvm_rel::new_rel("disk-1", "cvm-1", "alice").insert(&db).await?;
    let dup = disk_cvm_rel::new_rel("disk-1", "cvm-1", "bob").insert(&db).await;
    assert!(dup.is_err());

    security_group_cvm_rel::new_rel("sg-1", "cvm-1", "alice").insert(&db).await?;
    let dup = security_group_cvm_rel::new_rel("sg-1", "cvm-1", "alice").insert(&db).await;
    assert!(dup.is_err());
    Ok(())
}

#[tokio::test]
async fn rollback_discards_inserts() -> Result<()> {
    let db = setup_test_db().await?;
    let txn = db.begin().await?;
    disk_cvm_rel::new_rel("disk-1", "cvm-1", "alice").insert(&txn).await?;
    txn.rollback().await?;

    let count = disk_cvm_rel::Entity::find().count(&db).await?;
    assert_eq!(count, 0);
    Ok(())
}

#[tokio::test]
async fn relation_joins_disk() -> Result<()> {
    let db = setup_test_db().await?;
    disk_row("disk-1").insert(&db).await?;
    disk_cvm_rel::new_rel("disk-1", "cvm-1", "alice").insert(&db).await?;
    // relation without a disk row is dropped by the inner join
    disk_cvm_rel::new_rel("disk-missing", "cvm-1", "alice").insert(&db).await?;

    let rows = disk_cvm_rel::Entity::find()
        .select_only()
        .column_as(disk::Column::Id, "id")
        .column_as(disk_cvm_rel::Column::CvmId, "cvm_id")
        .join(JoinType::InnerJoin, disk_cvm_rel::Relation::Disk.def())
        .filter(disk_cvm_rel::Column::CvmId.eq("cvm-1"))
        .into_tuple::<(String, String)>()
        .all(&db)
        .await?;
    assert_eq!(rows, vec![("disk-1".to_string(), "cvm-1".to_string())]);
    Ok(())
}
