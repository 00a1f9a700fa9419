use axum::{extract::State, http::StatusCode, Json};
use service::query::ListResult;
use service::sg_cvm_rel::domain::{
    SGCvmRelBatchCreateReq, SGCvmRelDeleteReq, SGCvmRelListReq, SGCvmRelResult, SGCvmRelWithBaseSecurityGroup,
    SGCvmRelWithSecurityGroupListReq,
};
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{JsonBody, ReqKit};
use crate::state::AppState;

#[utoipa::path(
    post, path = "/api/v1/data/security_group_cvm_rels/batch/create", tag = "security_group_cvm_rel",
    params(("X-User-Name" = String, Header, description = "Acting user")),
    request_body = crate::openapi::SGCvmRelBatchCreateDoc,
    responses(
        (status = 204, description = "Created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorBody),
        (status = 500, description = "Create failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn batch_create(
    State(state): State<AppState>,
    ReqKit(kit): ReqKit,
    JsonBody(req): JsonBody<SGCvmRelBatchCreateReq>,
) -> Result<StatusCode, ApiError> {
    info!(rid = %kit.rid, user = %kit.user, rels = req.rels.len(), "batch create security group cvm rels");
    state.sg_cvm_rel.batch_create(&kit, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/v1/data/security_group_cvm_rels/list", tag = "security_group_cvm_rel",
    params(("X-User-Name" = String, Header, description = "Acting user")),
    request_body = crate::openapi::ListReqDoc,
    responses(
        (status = 200, description = "Count or details"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ReqKit(_kit): ReqKit,
    JsonBody(req): JsonBody<SGCvmRelListReq>,
) -> Result<Json<ListResult<SGCvmRelResult>>, ApiError> {
    Ok(Json(state.sg_cvm_rel.list(req).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/data/security_group_cvm_rels/batch", tag = "security_group_cvm_rel",
    params(("X-User-Name" = String, Header, description = "Acting user")),
    request_body = crate::openapi::DeleteReqDoc,
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorBody),
        (status = 500, description = "Delete failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn batch_delete(
    State(state): State<AppState>,
    ReqKit(kit): ReqKit,
    JsonBody(req): JsonBody<SGCvmRelDeleteReq>,
) -> Result<StatusCode, ApiError> {
    state.sg_cvm_rel.batch_delete(&kit, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/v1/data/security_group_cvm_rels/with/security_groups/list", tag = "security_group_cvm_rel",
    params(("X-User-Name" = String, Header, description = "Acting user")),
    request_body = crate::openapi::CvmIdsDoc,
    responses(
        (status = 200, description = "Security groups with relation audit"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorBody)
    )
)]
pub async fn list_with_security_group(
    State(state): State<AppState>,
    ReqKit(_kit): ReqKit,
    JsonBody(req): JsonBody<SGCvmRelWithSecurityGroupListReq>,
) -> Result<Json<Vec<SGCvmRelWithBaseSecurityGroup>>, ApiError> {
    Ok(Json(state.sg_cvm_rel.list_with_security_group(req).await?))
}
