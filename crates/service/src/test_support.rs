#![cfg(test)]
use chrono::Utc;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::{db::connect_with_config, disk, security_group};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Fresh in-memory database with every migration applied. Each call is isolated.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_disk(db: &DatabaseConnection, id: &str, vendor: &str, extension: &str) -> Result<(), anyhow::Error> {
    let now = Utc::now();
    disk::ActiveModel {
        id: Set(id.to_string()),
        vendor: Set(vendor.to_string()),
        account_id: Set("account-1".into()),
        cloud_id: Set(format!("cloud-{id}")),
        bk_biz_id: Set(-1),
        name: Set(format!("name-{id}")),
        region: Set("region-1".into()),
        zone: Set("zone-1".into()),
        disk_size: Set(100),
        disk_type: Set("SSD".into()),
        status: Set("ATTACHED".into()),
        recycle_status: Set("".into()),
        memo: Set(None),
        creator: Set("admin".into()),
        reviser: Set("admin".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        extension: Set(extension.to_string()),
    }
    .insert(db)
    .await?;
    Ok(())
}

pub async fn seed_security_group(db: &DatabaseConnection, id: &str, vendor: &str) -> Result<(), anyhow::Error> {
    let now = Utc::now();
    security_group::ActiveModel {
        id: Set(id.to_string()),
        vendor: Set(vendor.to_string()),
        cloud_id: Set(format!("cloud-{id}")),
        region: Set("region-1".into()),
        name: Set(format!("name-{id}")),
        memo: Set(Some("web tier".into())),
        account_id: Set("account-1".into()),
        bk_biz_id: Set(-1),
        creator: Set("admin".into()),
        reviser: Set("admin".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await?;
    Ok(())
}
