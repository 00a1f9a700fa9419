use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cloud disk. `extension` holds the vendor payload as JSON text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "disk")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    #[sea_orm(column_type = "Text")]
    pub extension: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}
