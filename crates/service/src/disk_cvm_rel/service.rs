use std::sync::Arc;

use models::{disk_cvm_rel, filter::Expression, page::BasePage, vendor::Vendor};
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

use crate::disk_cvm_rel::domain::{
    DiskCvmRelBatchCreateReq, DiskCvmRelDeleteReq, DiskCvmRelListReq, DiskCvmRelResult, DiskCvmRelWithDiskListReq,
};
use crate::disk_cvm_rel::ext::{to_vendor_list, DiskExtWithCvmIdList, DiskWithCvmIdResult};
use crate::disk_cvm_rel::repository::DiskCvmRelRepository;
use crate::errors::ServiceError;
use crate::kit::Kit;
use crate::query::{ListOption, ListResult};
use crate::txn::auto_txn;

/// Disk to cvm relation operations.
pub struct DiskCvmRelService<R: DiskCvmRelRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: DiskCvmRelRepository + 'static> DiskCvmRelService<R> {
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self { Self { db, repo } }

    /// Insert every pair in one transaction, attributed to the acting user.
    #[instrument(skip_all, fields(rid = %kit.rid, user = %kit.user, rels = req.rels.len()))]
    pub async fn batch_create(&self, kit: &Kit, req: DiskCvmRelBatchCreateReq) -> Result<(), ServiceError> {
        req.validate()?;

        let rels: Vec<disk_cvm_rel::ActiveModel> =
            req.rels.iter().map(|r| disk_cvm_rel::new_rel(&r.disk_id, &r.cvm_id, &kit.user)).collect();
        let count = rels.len();
        let repo = self.repo.clone();
        auto_txn(&self.db, move |txn| Box::pin(async move { repo.batch_create_with_tx(txn, rels).await }))
            .await
            .map_err(|e| {
                error!(error = %e, "batch create disk cvm rels failed");
                e
            })?;

        info!(count, "disk cvm rels created");
        Ok(())
    }

    #[instrument(skip_all, fields(count = req.page.count))]
    pub async fn list(&self, req: DiskCvmRelListReq) -> Result<ListResult<DiskCvmRelResult>, ServiceError> {
        req.validate()?;

        let opt = ListOption { fields: req.fields, filter: req.filter, page: req.page };
        let res = self.repo.list(&opt).await?;
        Ok(res.map(|m| DiskCvmRelResult::project(m, &opt.fields)))
    }

    /// Resolve the matching ids first, then delete by id. Nothing matched is a no-op.
    #[instrument(skip_all, fields(rid = %kit.rid, user = %kit.user))]
    pub async fn batch_delete(&self, kit: &Kit, req: DiskCvmRelDeleteReq) -> Result<(), ServiceError> {
        let opt = ListOption { fields: vec!["id".to_string()], filter: req.filter, page: BasePage::default_page() };
        let ids: Vec<i64> = self.repo.list(&opt).await?.into_details().into_iter().map(|m| m.id).collect();
        if ids.is_empty() {
            info!("no disk cvm rel matched, nothing to delete");
            return Ok(());
        }

        let by_id = Expression::containers("id", ids.iter().copied());
        let repo = self.repo.clone();
        let deleted = auto_txn(&self.db, move |txn| Box::pin(async move { repo.delete_with_tx(txn, &by_id).await }))
            .await
            .map_err(|e| {
                error!(error = %e, "batch delete disk cvm rels failed");
                e
            })?;

        info!(deleted, "disk cvm rels deleted");
        Ok(())
    }

    #[instrument(skip_all, fields(cvms = req.cvm_ids.len()))]
    pub async fn list_with_disk(&self, req: DiskCvmRelWithDiskListReq) -> Result<Vec<DiskWithCvmIdResult>, ServiceError> {
        req.validate()?;
        let rows = self.repo.list_join_disk(&req.cvm_ids).await?;
        Ok(rows.into_iter().map(DiskWithCvmIdResult::from).collect())
    }

    /// Like `list_with_disk`, with each row's extension decoded as `vendor`'s payload.
    #[instrument(skip_all, fields(vendor = %vendor, cvms = req.cvm_ids.len()))]
    pub async fn list_with_disk_ext(
        &self,
        vendor: &str,
        req: DiskCvmRelWithDiskListReq,
    ) -> Result<DiskExtWithCvmIdList, ServiceError> {
        let vendor: Vendor = vendor.parse()?;
        req.validate()?;
        let rows = self.repo.list_join_disk(&req.cvm_ids).await?;
        to_vendor_list(vendor, rows).map_err(|e| {
            error!(error = %e, "decode disk extension failed");
            e
        })
    }
}
