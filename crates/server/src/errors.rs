use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Body of every failed `/api/v1` call.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub code: u16,
    pub kind: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ServiceError::DecodeRequestFailed(_) | ServiceError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ServiceError::Db(_) | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "request failed");
        }
        let body = ErrorBody { code: self.0.code(), kind: self.0.kind().to_string(), message: self.0.to_string() };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(ApiError(ServiceError::invalid("x")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError(ServiceError::DecodeRequestFailed("x".into())).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_map_to_500() {
        assert_eq!(ApiError(ServiceError::db("list", "boom")).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError(ServiceError::Internal("x".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
