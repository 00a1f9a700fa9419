use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::disk_cvm_rel::{DiskCvmRelService, SeaOrmDiskCvmRelRepository};
use service::sg_cvm_rel::{SGCvmRelService, SeaOrmSGCvmRelRepository};

#[derive(Clone)]
pub struct AppState {
    pub disk_cvm_rel: Arc<DiskCvmRelService<SeaOrmDiskCvmRelRepository>>,
    pub sg_cvm_rel: Arc<SGCvmRelService<SeaOrmSGCvmRelRepository>>,
}

impl AppState {
    /// Wire every service to the same connection pool.
    pub fn new(db: DatabaseConnection) -> Self {
        let disk_repo = Arc::new(SeaOrmDiskCvmRelRepository { db: db.clone() });
        let sg_repo = Arc::new(SeaOrmSGCvmRelRepository { db: db.clone() });
        Self {
            disk_cvm_rel: Arc::new(DiskCvmRelService::new(db.clone(), disk_repo)),
            sg_cvm_rel: Arc::new(SGCvmRelService::new(db, sg_repo)),
        }
    }
}
