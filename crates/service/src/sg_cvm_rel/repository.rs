use async_trait::async_trait;
use models::{
    filter::Expression,
    security_group,
    security_group_cvm_rel::{self, SecurityGroupWithCvmId},
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Iterable, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::errors::ServiceError;
use crate::query::{ListOption, ListResult};

#[async_trait]
pub trait SGCvmRelRepository: Send + Sync {
    async fn batch_create_with_tx(
        &self,
        txn: &DatabaseTransaction,
        rels: Vec<security_group_cvm_rel::ActiveModel>,
    ) -> Result<(), ServiceError>;
    async fn list(&self, opt: &ListOption) -> Result<ListResult<security_group_cvm_rel::Model>, ServiceError>;
    async fn delete_with_tx(&self, txn: &DatabaseTransaction, filter: &Expression) -> Result<u64, ServiceError>;
    async fn list_join_security_group(&self, cvm_ids: &[String]) -> Result<Vec<SecurityGroupWithCvmId>, ServiceError>;
}

pub struct SeaOrmSGCvmRelRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl SGCvmRelRepository for SeaOrmSGCvmRelRepository {
    async fn batch_create_with_tx(
        &self,
        txn: &DatabaseTransaction,
        rels: Vec<security_group_cvm_rel::ActiveModel>,
    ) -> Result<(), ServiceError> {
        if rels.is_empty() {
            return Ok(());
        }
        security_group_cvm_rel::Entity::insert_many(rels)
            .exec(txn)
            .await
            .map_err(|e| ServiceError::db("insert security_group_cvm_rel", e))?;
        Ok(())
    }

    async fn list(&self, opt: &ListOption) -> Result<ListResult<security_group_cvm_rel::Model>, ServiceError> {
        opt.validate_fields(security_group_cvm_rel::column)?;
        let cond = opt.filter.to_condition(&security_group_cvm_rel::column)?;
        let query = security_group_cvm_rel::Entity::find().filter(cond);

        if opt.page.count {
            let count = query
                .count(&self.db)
                .await
                .map_err(|e| ServiceError::db("count security_group_cvm_rel", e))?;
            return Ok(ListResult::count(count));
        }

        let rows = opt
            .page
            .apply(query, &security_group_cvm_rel::column, security_group_cvm_rel::Column::Id)?
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::db("list security_group_cvm_rel", e))?;
        Ok(ListResult::details(rows))
    }

    async fn delete_with_tx(&self, txn: &DatabaseTransaction, filter: &Expression) -> Result<u64, ServiceError> {
        let cond = filter.to_condition(&security_group_cvm_rel::column)?;
        let res = security_group_cvm_rel::Entity::delete_many()
            .filter(cond)
            .exec(txn)
            .await
            .map_err(|e| ServiceError::db("delete security_group_cvm_rel", e))?;
        Ok(res.rows_affected)
    }

    async fn list_join_security_group(&self, cvm_ids: &[String]) -> Result<Vec<SecurityGroupWithCvmId>, ServiceError> {
        security_group_cvm_rel::Entity::find()
            .select_only()
            .columns(security_group::Column::iter())
            .column(security_group_cvm_rel::Column::CvmId)
            .column_as(security_group_cvm_rel::Column::Creator, "rel_creator")
            .column_as(security_group_cvm_rel::Column::CreatedAt, "rel_created_at")
            .join(JoinType::InnerJoin, security_group_cvm_rel::Relation::SecurityGroup.def())
            .filter(security_group_cvm_rel::Column::CvmId.is_in(cvm_ids.iter().cloned()))
            .order_by_asc(security_group_cvm_rel::Column::Id)
            .into_model::<SecurityGroupWithCvmId>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::db("list security_group_cvm_rel join security_group", e))
    }
}
