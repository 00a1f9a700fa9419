pub mod domain;
pub mod repository;
pub mod service;

pub use repository::{SGCvmRelRepository, SeaOrmSGCvmRelRepository};
pub use service::SGCvmRelService;
