pub mod disk_cvm_rel;
pub mod sg_cvm_rel;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tower::ServiceBuilder;
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/disk_cvm_rels/batch/create", post(disk_cvm_rel::batch_create))
        .route("/disk_cvm_rels/list", post(disk_cvm_rel::list))
        .route("/disk_cvm_rels/batch", delete(disk_cvm_rel::batch_delete))
        .route("/disk_cvm_rels/with/disks/list", post(disk_cvm_rel::list_with_disk))
        .route("/vendors/:vendor/disk_cvm_rels/with/disks/list", post(disk_cvm_rel::list_with_disk_ext))
        .route("/security_group_cvm_rels/batch/create", post(sg_cvm_rel::batch_create))
        .route("/security_group_cvm_rels/list", post(sg_cvm_rel::list))
        .route("/security_group_cvm_rels/batch", delete(sg_cvm_rel::batch_delete))
        .route(
            "/security_group_cvm_rels/with/security_groups/list",
            post(sg_cvm_rel::list_with_security_group),
        )
}

/// Build the full application router: health, OpenAPI document and the data API.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1/data", data_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        // 5xx
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
