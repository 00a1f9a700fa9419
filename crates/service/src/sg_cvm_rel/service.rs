use std::sync::Arc;

use models::{filter::Expression, page::BasePage, security_group_cvm_rel};
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

use crate::errors::ServiceError;
use crate::kit::Kit;
use crate::query::{ListOption, ListResult};
use crate::sg_cvm_rel::domain::{
    SGCvmRelBatchCreateReq, SGCvmRelDeleteReq, SGCvmRelListReq, SGCvmRelResult, SGCvmRelWithBaseSecurityGroup,
    SGCvmRelWithSecurityGroupListReq,
};
use crate::sg_cvm_rel::repository::SGCvmRelRepository;
use crate::txn::auto_txn;

/// Security group to cvm relation operations.
pub struct SGCvmRelService<R: SGCvmRelRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: SGCvmRelRepository + 'static> SGCvmRelService<R> {
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self { Self { db, repo } }

    #[instrument(skip_all, fields(rid = %kit.rid, user = %kit.user, rels = req.rels.len()))]
    pub async fn batch_create(&self, kit: &Kit, req: SGCvmRelBatchCreateReq) -> Result<(), ServiceError> {
        req.validate()?;

        let rels: Vec<security_group_cvm_rel::ActiveModel> = req
            .rels
            .iter()
            .map(|r| security_group_cvm_rel::new_rel(&r.security_group_id, &r.cvm_id, &kit.user))
            .collect();
        let count = rels.len();
        let repo = self.repo.clone();
        auto_txn(&self.db, move |txn| Box::pin(async move { repo.batch_create_with_tx(txn, rels).await }))
            .await
            .map_err(|e| {
                error!(error = %e, "batch create security group cvm rels failed");
                e
            })?;

        info!(count, "security group cvm rels created");
        Ok(())
    }

    #[instrument(skip_all, fields(count = req.page.count))]
    pub async fn list(&self, req: SGCvmRelListReq) -> Result<ListResult<SGCvmRelResult>, ServiceError> {
        req.validate()?;

        let opt = ListOption { fields: req.fields, filter: req.filter, page: req.page };
        let res = self.repo.list(&opt).await?;
        Ok(res.map(|m| SGCvmRelResult::project(m, &opt.fields)))
    }

    #[instrument(skip_all, fields(rid = %kit.rid, user = %kit.user))]
    pub async fn batch_delete(&self, kit: &Kit, req: SGCvmRelDeleteReq) -> Result<(), ServiceError> {
        let opt = ListOption { fields: vec!["id".to_string()], filter: req.filter, page: BasePage::default_page() };
        let ids: Vec<i64> = self.repo.list(&opt).await?.into_details().into_iter().map(|m| m.id).collect();
        if ids.is_empty() {
            info!("no security group cvm rel matched, nothing to delete");
            return Ok(());
        }

        let by_id = Expression::containers("id", ids.iter().copied());
        let repo = self.repo.clone();
        let deleted = auto_txn(&self.db, move |txn| Box::pin(async move { repo.delete_with_tx(txn, &by_id).await }))
            .await
            .map_err(|e| {
                error!(error = %e, "batch delete security group cvm rels failed");
                e
            })?;

        info!(deleted, "security group cvm rels deleted");
        Ok(())
    }

    #[instrument(skip_all, fields(cvms = req.cvm_ids.len()))]
    pub async fn list_with_security_group(
        &self,
        req: SGCvmRelWithSecurityGroupListReq,
    ) -> Result<Vec<SGCvmRelWithBaseSecurityGroup>, ServiceError> {
        req.validate()?;
        let rows = self.repo.list_join_security_group(&req.cvm_ids).await?;
        Ok(rows.into_iter().map(SGCvmRelWithBaseSecurityGroup::from).collect())
    }
}
