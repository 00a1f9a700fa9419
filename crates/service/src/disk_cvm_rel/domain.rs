use std::collections::HashSet;

use models::{disk_cvm_rel, filter::Expression, page::BasePage};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::query::{validate_cvm_ids, wants, BATCH_OPERATION_MAX_LIMIT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskCvmRelCreateReq {
    pub cvm_id: String,
    pub disk_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskCvmRelBatchCreateReq {
    pub rels: Vec<DiskCvmRelCreateReq>,
}

impl DiskCvmRelBatchCreateReq {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.rels.is_empty() {
            return Err(ServiceError::invalid("rels is required"));
        }
        if self.rels.len() > BATCH_OPERATION_MAX_LIMIT {
            return Err(ServiceError::invalid(format!("rels should <= {BATCH_OPERATION_MAX_LIMIT}")));
        }
        let mut seen = HashSet::with_capacity(self.rels.len());
        for rel in &self.rels {
            if rel.cvm_id.trim().is_empty() || rel.disk_id.trim().is_empty() {
                return Err(ServiceError::invalid("cvm_id and disk_id are required"));
            }
            if !seen.insert((rel.cvm_id.as_str(), rel.disk_id.as_str())) {
                return Err(ServiceError::invalid(format!(
                    "duplicate rel, cvm_id: {}, disk_id: {}",
                    rel.cvm_id, rel.disk_id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskCvmRelListReq {
    #[serde(default)]
    pub fields: Vec<String>,
    pub filter: Expression,
    pub page: BasePage,
}

impl DiskCvmRelListReq {
    pub fn validate(&self) -> Result<(), ServiceError> {
        self.page.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskCvmRelDeleteReq {
    pub filter: Expression,
}

/// Body of both the plain and the vendor-extended join list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskCvmRelWithDiskListReq {
    pub cvm_ids: Vec<String>,
}

impl DiskCvmRelWithDiskListReq {
    pub fn validate(&self) -> Result<(), ServiceError> { validate_cvm_ids(&self.cvm_ids) }
}

/// One relation row. Fields outside the requested projection are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskCvmRelResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl DiskCvmRelResult {
    pub fn project(m: disk_cvm_rel::Model, fields: &[String]) -> Self {
        Self {
            id: wants(fields, "id").then_some(m.id),
            disk_id: wants(fields, "disk_id").then_some(m.disk_id),
            cvm_id: wants(fields, "cvm_id").then_some(m.cvm_id),
            creator: wants(fields, "creator").then_some(m.creator),
            created_at: wants(fields, "created_at").then(|| m.created_at.to_rfc3339()),
        }
    }
}
