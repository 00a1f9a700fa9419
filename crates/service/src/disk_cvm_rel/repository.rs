use async_trait::async_trait;
use models::{
    disk,
    disk_cvm_rel::{self, DiskWithCvmId},
    filter::Expression,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Iterable, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::errors::ServiceError;
use crate::query::{ListOption, ListResult};

#[async_trait]
pub trait DiskCvmRelRepository: Send + Sync {
    async fn batch_create_with_tx(
        &self,
        txn: &DatabaseTransaction,
        rels: Vec<disk_cvm_rel::ActiveModel>,
    ) -> Result<(), ServiceError>;
    async fn list(&self, opt: &ListOption) -> Result<ListResult<disk_cvm_rel::Model>, ServiceError>;
    async fn delete_with_tx(&self, txn: &DatabaseTransaction, filter: &Expression) -> Result<u64, ServiceError>;
    async fn list_join_disk(&self, cvm_ids: &[String]) -> Result<Vec<DiskWithCvmId>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmDiskCvmRelRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl DiskCvmRelRepository for SeaOrmDiskCvmRelRepository {
    async fn batch_create_with_tx(
        &self,
        txn: &DatabaseTransaction,
        rels: Vec<disk_cvm_rel::ActiveModel>,
    ) -> Result<(), ServiceError> {
        if rels.is_empty() {
            return Ok(());
        }
        disk_cvm_rel::Entity::insert_many(rels)
            .exec(txn)
            .await
            .map_err(|e| ServiceError::db("insert disk_cvm_rel", e))?;
        Ok(())
    }

    async fn list(&self, opt: &ListOption) -> Result<ListResult<disk_cvm_rel::Model>, ServiceError> {
        opt.validate_fields(disk_cvm_rel::column)?;
        let cond = opt.filter.to_condition(&disk_cvm_rel::column)?;
        let query = disk_cvm_rel::Entity::find().filter(cond);

        if opt.page.count {
            let count = query.count(&self.db).await.map_err(|e| ServiceError::db("count disk_cvm_rel", e))?;
            return Ok(ListResult::count(count));
        }

        let rows = opt
            .page
            .apply(query, &disk_cvm_rel::column, disk_cvm_rel::Column::Id)?
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::db("list disk_cvm_rel", e))?;
        Ok(ListResult::details(rows))
    }

    async fn delete_with_tx(&self, txn: &DatabaseTransaction, filter: &Expression) -> Result<u64, ServiceError> {
        let cond = filter.to_condition(&disk_cvm_rel::column)?;
        let res = disk_cvm_rel::Entity::delete_many()
            .filter(cond)
            .exec(txn)
            .await
            .map_err(|e| ServiceError::db("delete disk_cvm_rel", e))?;
        Ok(res.rows_affected)
    }

    async fn list_join_disk(&self, cvm_ids: &[String]) -> Result<Vec<DiskWithCvmId>, ServiceError> {
        disk_cvm_rel::Entity::find()
            .select_only()
            .columns(disk::Column::iter())
            .column(disk_cvm_rel::Column::CvmId)
            .join(JoinType::InnerJoin, disk_cvm_rel::Relation::Disk.def())
            .filter(disk_cvm_rel::Column::CvmId.is_in(cvm_ids.iter().cloned()))
            .order_by_asc(disk_cvm_rel::Column::Id)
            .into_model::<DiskWithCvmId>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::db("list disk_cvm_rel join disk", e))
    }
}
