use std::collections::HashSet;

use models::{
    filter::Expression,
    page::BasePage,
    security_group_cvm_rel::{self, SecurityGroupWithCvmId},
};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::query::{validate_cvm_ids, wants, BATCH_OPERATION_MAX_LIMIT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SGCvmRelCreateReq {
    pub cvm_id: String,
    pub security_group_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SGCvmRelBatchCreateReq {
    pub rels: Vec<SGCvmRelCreateReq>,
}

impl SGCvmRelBatchCreateReq {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.rels.is_empty() {
            return Err(ServiceError::invalid("rels is required"));
        }
        if self.rels.len() > BATCH_OPERATION_MAX_LIMIT {
            return Err(ServiceError::invalid(format!("rels should <= {BATCH_OPERATION_MAX_LIMIT}")));
        }
        let mut seen = HashSet::with_capacity(self.rels.len());
        for rel in &self.rels {
            if rel.cvm_id.trim().is_empty() || rel.security_group_id.trim().is_empty() {
                return Err(ServiceError::invalid("cvm_id and security_group_id are required"));
            }
            if !seen.insert((rel.cvm_id.as_str(), rel.security_group_id.as_str())) {
                return Err(ServiceError::invalid(format!(
                    "duplicate rel, cvm_id: {}, security_group_id: {}",
                    rel.cvm_id, rel.security_group_id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SGCvmRelListReq {
    #[serde(default)]
    pub fields: Vec<String>,
    pub filter: Expression,
    pub page: BasePage,
}

impl SGCvmRelListReq {
    pub fn validate(&self) -> Result<(), ServiceError> {
        self.page.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SGCvmRelDeleteReq {
    pub filter: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SGCvmRelWithSecurityGroupListReq {
    pub cvm_ids: Vec<String>,
}

impl SGCvmRelWithSecurityGroupListReq {
    pub fn validate(&self) -> Result<(), ServiceError> { validate_cvm_ids(&self.cvm_ids) }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SGCvmRelResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SGCvmRelResult {
    pub fn project(m: security_group_cvm_rel::Model, fields: &[String]) -> Self {
        Self {
            id: wants(fields, "id").then_some(m.id),
            cvm_id: wants(fields, "cvm_id").then_some(m.cvm_id),
            security_group_id: wants(fields, "security_group_id").then_some(m.security_group_id),
            creator: wants(fields, "creator").then_some(m.creator),
            created_at: wants(fields, "created_at").then(|| m.created_at.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSecurityGroup {
    pub id: String,
    pub vendor: String,
    pub cloud_id: String,
    pub region: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub account_id: String,
    pub bk_biz_id: i64,
    pub creator: String,
    pub reviser: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A security group plus the relation row that ties it to `cvm_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SGCvmRelWithBaseSecurityGroup {
    #[serde(flatten)]
    pub base: BaseSecurityGroup,
    pub cvm_id: String,
    pub rel_creator: String,
    pub rel_created_at: String,
}

impl From<SecurityGroupWithCvmId> for SGCvmRelWithBaseSecurityGroup {
    fn from(row: SecurityGroupWithCvmId) -> Self {
        Self {
            base: BaseSecurityGroup {
                id: row.id,
                vendor: row.vendor,
                cloud_id: row.cloud_id,
                region: row.region,
                name: row.name,
                memo: row.memo,
                account_id: row.account_id,
                bk_biz_id: row.bk_biz_id,
                creator: row.creator,
                reviser: row.reviser,
                created_at: row.created_at.to_rfc3339(),
                updated_at: row.updated_at.to_rfc3339(),
            },
            cvm_id: row.cvm_id,
            rel_creator: row.rel_creator,
            rel_created_at: row.rel_created_at.to_rfc3339(),
        }
    }
}
