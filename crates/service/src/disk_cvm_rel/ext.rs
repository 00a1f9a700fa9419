//! Disk response shapes, with and without the vendor extension payload.

use models::{disk_cvm_rel::DiskWithCvmId, vendor::Vendor};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::ServiceError;

/// Vendor-agnostic disk attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskResult {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub creator: String,
    pub reviser: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&DiskWithCvmId> for DiskResult {
    fn from(row: &DiskWithCvmId) -> Self {
        Self {
            id: row.id.clone(),
            vendor: row.vendor.clone(),
            account_id: row.account_id.clone(),
            cloud_id: row.cloud_id.clone(),
            bk_biz_id: row.bk_biz_id,
            name: row.name.clone(),
            region: row.region.clone(),
            zone: row.zone.clone(),
            disk_size: row.disk_size,
            disk_type: row.disk_type.clone(),
            status: row.status.clone(),
            recycle_status: row.recycle_status.clone(),
            memo: row.memo.clone(),
            creator: row.creator.clone(),
            reviser: row.reviser.clone(),
            created_at: row.created_at.to_rfc3339(),
            updated_at: row.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskWithCvmIdResult {
    #[serde(flatten)]
    pub disk: DiskResult,
    pub cvm_id: String,
}

impl From<DiskWithCvmId> for DiskWithCvmIdResult {
    fn from(row: DiskWithCvmId) -> Self {
        Self { disk: DiskResult::from(&row), cvm_id: row.cvm_id }
    }
}

/// A vendor's disk extension payload as stored in `disk.extension`.
pub trait DiskExtension: Serialize + DeserializeOwned + Default + Send + 'static {
    const VENDOR: Vendor;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TCloudDiskChargePrepaid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renew_flag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TCloudDiskExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_charge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_charge_prepaid: Option<TCloudDiskChargePrepaid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<String>,
}

impl DiskExtension for TCloudDiskExtension {
    const VENDOR: Vendor = Vendor::TCloud;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwsDiskAttachment {
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub delete_on_termination: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwsDiskExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iops: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachment: Vec<AwsDiskAttachment>,
}

impl DiskExtension for AwsDiskExtension {
    const VENDOR: Vendor = Vendor::Aws;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GcpDiskExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
}

impl DiskExtension for GcpDiskExtension {
    const VENDOR: Vendor = Vendor::Gcp;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AzureDiskExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
}

impl DiskExtension for AzureDiskExtension {
    const VENDOR: Vendor = Vendor::Azure;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HuaWeiDiskAttachment {
    #[serde(default)]
    pub attachment_id: String,
    #[serde(default)]
    pub server_id: String,
    #[serde(default)]
    pub device: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HuaWeiDiskExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachment: Vec<HuaWeiDiskAttachment>,
}

impl DiskExtension for HuaWeiDiskExtension {
    const VENDOR: Vendor = Vendor::HuaWei;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskExtWithCvmId<E> {
    #[serde(flatten)]
    pub disk: DiskResult,
    pub extension: E,
    pub cvm_id: String,
}

/// Join-list result for one vendor; serializes as a plain array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiskExtWithCvmIdList {
    TCloud(Vec<DiskExtWithCvmId<TCloudDiskExtension>>),
    Aws(Vec<DiskExtWithCvmId<AwsDiskExtension>>),
    Gcp(Vec<DiskExtWithCvmId<GcpDiskExtension>>),
    Azure(Vec<DiskExtWithCvmId<AzureDiskExtension>>),
    HuaWei(Vec<DiskExtWithCvmId<HuaWeiDiskExtension>>),
}

/// Decode every row's extension as `E`. One bad row fails the whole list.
pub fn to_disk_ext_with_cvm_ids<E: DiskExtension>(rows: Vec<DiskWithCvmId>) -> Result<Vec<DiskExtWithCvmId<E>>, ServiceError> {
    rows.into_iter()
        .map(|row| {
            let extension = if row.extension.trim().is_empty() {
                E::default()
            } else {
                serde_json::from_str::<E>(&row.extension).map_err(|e| {
                    ServiceError::Internal(format!("decode {} extension of disk {} failed, err: {e}", E::VENDOR, row.id))
                })?
            };
            Ok(DiskExtWithCvmId { disk: DiskResult::from(&row), extension, cvm_id: row.cvm_id })
        })
        .collect()
}

/// Pick the extension type for `vendor`.
pub fn to_vendor_list(vendor: Vendor, rows: Vec<DiskWithCvmId>) -> Result<DiskExtWithCvmIdList, ServiceError> {
    Ok(match vendor {
        Vendor::TCloud => DiskExtWithCvmIdList::TCloud(to_disk_ext_with_cvm_ids(rows)?),
        Vendor::Aws => DiskExtWithCvmIdList::Aws(to_disk_ext_with_cvm_ids(rows)?),
        Vendor::Gcp => DiskExtWithCvmIdList::Gcp(to_disk_ext_with_cvm_ids(rows)?),
        Vendor::Azure => DiskExtWithCvmIdList::Azure(to_disk_ext_with_cvm_ids(rows)?),
        Vendor::HuaWei => DiskExtWithCvmIdList::HuaWei(to_disk_ext_with_cvm_ids(rows)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn row(id: &str, extension: &str) -> DiskWithCvmId {
        let now = Utc::now();
        DiskWithCvmId {
            id: id.into(),
            vendor: "tcloud".into(),
            account_id: "account-1".into(),
            cloud_id: format!("disk-{id}"),
            bk_biz_id: -1,
            name: "data".into(),
            region: "ap-guangzhou".into(),
            zone: "ap-guangzhou-3".into(),
            disk_size: 100,
            disk_type: "CLOUD_SSD".into(),
            status: "ATTACHED".into(),
            recycle_status: "".into(),
            memo: None,
            creator: "admin".into(),
            reviser: "admin".into(),
            created_at: now.into(),
            updated_at: now.into(),
            extension: extension.into(),
            cvm_id: "cvm-1".into(),
        }
    }

    #[test]
    fn decodes_tcloud_extension() {
        let rows = vec![row("d1", r#"{"disk_charge_type":"PREPAID","disk_charge_prepaid":{"period":1},"encrypted":true}"#)];
        let out = to_disk_ext_with_cvm_ids::<TCloudDiskExtension>(rows).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].extension.disk_charge_type.as_deref(), Some("PREPAID"));
        assert_eq!(out[0].extension.disk_charge_prepaid.as_ref().and_then(|p| p.period), Some(1));
        assert_eq!(out[0].cvm_id, "cvm-1");
    }

    #[test]
    fn blank_extension_decodes_to_default() {
        let out = to_disk_ext_with_cvm_ids::<AwsDiskExtension>(vec![row("d1", "")]).unwrap();
        assert_eq!(out[0].extension, AwsDiskExtension::default());
    }

    #[test]
    fn one_bad_row_fails_all() {
        let rows = vec![row("d1", "{}"), row("d2", "not json")];
        let err = to_disk_ext_with_cvm_ids::<GcpDiskExtension>(rows).unwrap_err();
        assert!(matches!(err, ServiceError::Internal(ref m) if m.contains("d2")));
    }

    #[test]
    fn vendor_list_picks_matching_variant() {
        for v in Vendor::ALL {
            let list = to_vendor_list(v, vec![row("d1", "{}")]).unwrap();
            let matched = match (v, &list) {
                (Vendor::TCloud, DiskExtWithCvmIdList::TCloud(rows)) => rows.len(),
                (Vendor::Aws, DiskExtWithCvmIdList::Aws(rows)) => rows.len(),
                (Vendor::Gcp, DiskExtWithCvmIdList::Gcp(rows)) => rows.len(),
                (Vendor::Azure, DiskExtWithCvmIdList::Azure(rows)) => rows.len(),
                (Vendor::HuaWei, DiskExtWithCvmIdList::HuaWei(rows)) => rows.len(),
                _ => panic!("{v} decoded into {list:?}"),
            };
            assert_eq!(matched, 1);
        }
    }

    #[test]
    fn serializes_flat_with_extension_and_cvm_id() {
        let list = to_vendor_list(Vendor::Azure, vec![row("d1", r#"{"os_type":"Linux","zones":["1"]}"#)]).unwrap();
        let v = serde_json::to_value(&list).unwrap();
        assert_eq!(v[0]["id"], json!("d1"));
        assert_eq!(v[0]["cvm_id"], json!("cvm-1"));
        assert_eq!(v[0]["extension"]["os_type"], json!("Linux"));
        assert_eq!(v[0]["extension"]["zones"], json!(["1"]));
        assert!(v[0].get("memo").is_none());
    }
}
