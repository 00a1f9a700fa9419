use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::vendor::Vendor;
use service::disk_cvm_rel::domain::{
    DiskCvmRelBatchCreateReq, DiskCvmRelDeleteReq, DiskCvmRelListReq, DiskCvmRelResult, DiskCvmRelWithDiskListReq,
};
use service::disk_cvm_rel::ext::{DiskExtWithCvmIdList, DiskWithCvmIdResult};
use service::errors::ServiceError;
use service::query::ListResult;
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{JsonBody, ReqKit};
use crate::state::AppState;

#[utoipa::path(
    post, path = "/api/v1/data/disk_cvm_rels/batch/create", tag = "disk_cvm_rel",
    params(("X-User-Name" = String, Header, description = "Acting user")),
    request_body = crate::openapi::DiskCvmRelBatchCreateDoc,
    responses(
        (status = 204, description = "Created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorBody),
        (status = 500, description = "Create failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn batch_create(
    State(state): State<AppState>,
    ReqKit(kit): ReqKit,
    JsonBody(req): JsonBody<DiskCvmRelBatchCreateReq>,
) -> Result<StatusCode, ApiError> {
    info!(rid = %kit.rid, user = %kit.user, rels = req.rels.len(), "batch create disk cvm rels");
    state.disk_cvm_rel.batch_create(&kit, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/v1/data/disk_cvm_rels/list", tag = "disk_cvm_rel",
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
    JsonBody(req): JsonBody<DiskCvmRelListReq>,
) -> Result<Json<ListResult<DiskCvmRelResult>>, ApiError> {
    Ok(Json(state.disk_cvm_rel.list(req).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/data/disk_cvm_rels/batch", tag = "disk_cvm_rel",
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
    JsonBody(req): JsonBody<DiskCvmRelDeleteReq>,
) -> Result<StatusCode, ApiError> {
    state.disk_cvm_rel.batch_delete(&kit, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/v1/data/disk_cvm_rels/with/disks/list", tag = "disk_cvm_rel",
    params(("X-User-Name" = String, Header, description = "Acting user")),
    request_body = crate::openapi::CvmIdsDoc,
    responses(
        (status = 200, description = "Disks with their cvm id"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorBody)
    )
)]
pub async fn list_with_disk(
    State(state): State<AppState>,
    ReqKit(_kit): ReqKit,
    JsonBody(req): JsonBody<DiskCvmRelWithDiskListReq>,
) -> Result<Json<Vec<DiskWithCvmIdResult>>, ApiError> {
    Ok(Json(state.disk_cvm_rel.list_with_disk(req).await?))
}

#[utoipa::path(
    post, path = "/api/v1/data/vendors/{vendor}/disk_cvm_rels/with/disks/list", tag = "disk_cvm_rel",
    params(
        ("vendor" = String, Path, description = "tcloud, aws, gcp, azure or huawei"),
        ("X-User-Name" = String, Header, description = "Acting user")
    ),
    request_body = crate::openapi::CvmIdsDoc,
    responses(
        (status = 200, description = "Disks with vendor extension and cvm id"),
        (status = 400, description = "Invalid request or vendor", body = crate::errors::ErrorBody),
        (status = 500, description = "Extension decode failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn list_with_disk_ext(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
    ReqKit(_kit): ReqKit,
    body: Result<JsonBody<DiskCvmRelWithDiskListReq>, ApiError>,
) -> Result<Json<DiskExtWithCvmIdList>, ApiError> {
    // vendor first, so a bad vendor never depends on the body
    let vendor: Vendor = vendor.parse().map_err(ServiceError::from)?;
    let JsonBody(req) = body?;
    Ok(Json(state.disk_cvm_rel.list_with_disk_ext(vendor.as_str(), req).await?))
}
