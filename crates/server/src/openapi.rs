use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct DiskCvmRelCreateDoc { pub cvm_id: String, pub disk_id: String }

#[derive(ToSchema)]
pub struct DiskCvmRelBatchCreateDoc { pub rels: Vec<DiskCvmRelCreateDoc> }

#[derive(ToSchema)]
pub struct SGCvmRelCreateDoc { pub cvm_id: String, pub security_group_id: String }

#[derive(ToSchema)]
pub struct SGCvmRelBatchCreateDoc { pub rels: Vec<SGCvmRelCreateDoc> }

/// `count` is exclusive with `start`, `limit`, `sort` and `order`.
#[derive(ToSchema)]
pub struct PageDoc {
    pub count: bool,
    pub start: u32,
    pub limit: u32,
    pub sort: Option<String>,
    /// `ASC` or `DESC`
    pub order: Option<String>,
}

/// `filter` is `{"op": "and"|"or", "rules": [...]}`; a rule is `{"field", "op", "value"}`
/// or a nested filter.
#[derive(ToSchema)]
pub struct ListReqDoc {
    pub fields: Vec<String>,
    #[schema(value_type = Object)]
    pub filter: serde_json::Value,
    pub page: PageDoc,
}

#[derive(ToSchema)]
pub struct DeleteReqDoc {
    #[schema(value_type = Object)]
    pub filter: serde_json::Value,
}

#[derive(ToSchema)]
pub struct CvmIdsDoc { pub cvm_ids: Vec<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::disk_cvm_rel::batch_create,
        crate::routes::disk_cvm_rel::list,
        crate::routes::disk_cvm_rel::batch_delete,
        crate::routes::disk_cvm_rel::list_with_disk,
        crate::routes::disk_cvm_rel::list_with_disk_ext,
        crate::routes::sg_cvm_rel::batch_create,
        crate::routes::sg_cvm_rel::list,
        crate::routes::sg_cvm_rel::batch_delete,
        crate::routes::sg_cvm_rel::list_with_security_group,
    ),
    components(
        schemas(
            HealthResponse,
            DiskCvmRelCreateDoc,
            DiskCvmRelBatchCreateDoc,
            SGCvmRelCreateDoc,
            SGCvmRelBatchCreateDoc,
            PageDoc,
            ListReqDoc,
            DeleteReqDoc,
            CvmIdsDoc,
            crate::errors::ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "disk_cvm_rel"),
        (name = "security_group_cvm_rel")
    )
)]
pub struct ApiDoc;
