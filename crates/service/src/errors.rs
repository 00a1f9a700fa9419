use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("decode request failed: {0}")]
    DecodeRequestFailed(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::InvalidParameter(msg.into()) }

    /// Wrap a store error with what was being done.
    pub fn db(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Db(format!("{context} failed, err: {err}"))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::DecodeRequestFailed(_) => 2001,
            ServiceError::InvalidParameter(_) => 2002,
            ServiceError::Db(_) => 2100,
            ServiceError::Internal(_) => 2200,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::DecodeRequestFailed(_) => "DecodeRequestFailed",
            ServiceError::InvalidParameter(_) => "InvalidParameter",
            ServiceError::Db(_) => "Db",
            ServiceError::Internal(_) => "Internal",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::InvalidParameter(msg),
        }
    }
}
