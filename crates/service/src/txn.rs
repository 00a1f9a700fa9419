use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};

use crate::errors::ServiceError;

/// Run `f` in one transaction: commit when it returns `Ok`, roll back otherwise.
pub async fn auto_txn<F, T>(db: &DatabaseConnection, f: F) -> Result<T, ServiceError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'c>>
        + Send,
    T: Send,
{
    db.transaction::<_, T, ServiceError>(f).await.map_err(|e| match e {
        TransactionError::Connection(db_err) => ServiceError::db("transaction", db_err),
        TransactionError::Transaction(err) => err,
    })
}
