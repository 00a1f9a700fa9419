use chrono::Utc;
use sea_orm::{entity::prelude::*, FromQueryResult, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::security_group;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "security_group_cvm_rel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub cvm_id: String,
    pub security_group_id: String,
    pub creator: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { SecurityGroup }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::SecurityGroup => Entity::belongs_to(security_group::Entity)
                .from(Column::SecurityGroupId)
                .to(security_group::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn column(name: &str) -> Option<Column> {
    match name {
        "id" => Some(Column::Id),
        "cvm_id" => Some(Column::CvmId),
        "security_group_id" => Some(Column::SecurityGroupId),
        "creator" => Some(Column::Creator),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

pub fn new_rel(security_group_id: &str, cvm_id: &str, creator: &str) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        cvm_id: Set(cvm_id.to_string()),
        security_group_id: Set(security_group_id.to_string()),
        creator: Set(creator.to_string()),
        created_at: Set(Utc::now().into()),
    }
}

/// Security group joined with one of its relation rows.
/// `creator`/`created_at` belong to the group, `rel_*` to the relation.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct SecurityGroupWithCvmId {
    pub id: String,
    pub vendor: String,
    pub cloud_id: String,
    pub region: String,
    pub name: String,
    pub memo: Option<String>,
    pub account_id: String,
    pub bk_biz_id: i64,
    pub creator: String,
    pub reviser: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub cvm_id: String,
    pub rel_creator: String,
    pub rel_created_at: DateTimeWithTimeZone,
}
