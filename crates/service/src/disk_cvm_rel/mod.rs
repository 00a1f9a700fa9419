pub mod domain;
pub mod ext;
pub mod repository;
pub mod service;

pub use repository::{DiskCvmRelRepository, SeaOrmDiskCvmRelRepository};
pub use service::DiskCvmRelService;
