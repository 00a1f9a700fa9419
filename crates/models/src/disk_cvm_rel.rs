use chrono::Utc;
use sea_orm::{entity::prelude::*, FromQueryResult, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::disk;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "disk_cvm_rel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub disk_id: String,
    pub cvm_id: String,
    pub creator: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Disk }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Disk => Entity::belongs_to(disk::Entity)
                .from(Column::DiskId)
                .to(disk::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Resolve a request-supplied field name to a column of this table.
pub fn column(name: &str) -> Option<Column> {
    match name {
        "id" => Some(Column::Id),
        "disk_id" => Some(Column::DiskId),
        "cvm_id" => Some(Column::CvmId),
        "creator" => Some(Column::Creator),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

/// New relation row; the id is assigned by the store.
pub fn new_rel(disk_id: &str, cvm_id: &str, creator: &str) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        disk_id: Set(disk_id.to_string()),
        cvm_id: Set(cvm_id.to_string()),
        creator: Set(creator.to_string()),
        created_at: Set(Utc::now().into()),
    }
}

/// Disk row joined with the cvm it is attached to.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct DiskWithCvmId {
    pub id: String,
    pub vendor: String,
    pub account_id: String,
    pub cloud_id: String,
    pub bk_biz_id: i64,
    pub name: String,
    pub region: String,
    pub zone: String,
    pub disk_size: i64,
    pub disk_type: String,
    pub status: String,
    pub recycle_status: String,
    pub memo: Option<String>,
    pub creator: String,
    pub reviser: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub extension: String,
    pub cvm_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_is_whitelisted() {
        assert!(matches!(column("disk_id"), Some(Column::DiskId)));
        assert!(matches!(column("created_at"), Some(Column::CreatedAt)));
        assert!(column("security_group_id").is_none());
        assert!(column("DISK_ID").is_none());
    }

    #[test]
    fn new_rel_leaves_id_unset() {
        let am = new_rel("disk-1", "cvm-1", "alice");
        assert!(am.id.is_not_set());
        assert_eq!(am.creator.as_ref(), "alice");
        assert_eq!(am.disk_id.as_ref(), "disk-1");
    }
}
