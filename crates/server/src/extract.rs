use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use common::{REQUEST_ID_HEADER, USER_HEADER};
use serde::de::DeserializeOwned;
use service::{errors::ServiceError, kit::Kit};
use uuid::Uuid;

use crate::errors::ApiError;

/// JSON body whose rejection renders as `DecodeRequestFailed`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError(ServiceError::DecodeRequestFailed(e.body_text())))?;
        Ok(Self(value))
    }
}

/// Acting user and request id taken from the request headers.
pub struct ReqKit(pub Kit);

#[async_trait]
impl<S> FromRequestParts<S> for ReqKit
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let user = header(USER_HEADER)
            .ok_or_else(|| ApiError(ServiceError::invalid(format!("{USER_HEADER} header is required"))))?;
        let rid = header(REQUEST_ID_HEADER).unwrap_or_else(|| Uuid::new_v4().to_string());
        Ok(Self(Kit::new(user, rid)))
    }
}
