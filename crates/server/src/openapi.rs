use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// ISO-8601 timestamp
    pub created_at: String,
    /// ISO-8601 timestamp
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct ItemCreateDoc {
    /// 1-100 characters
    pub name: String,
    /// at most 500 characters
    pub description: Option<String>,
    /// must be greater than 0
    pub price: f64,
}

/// Omitted fields are left unchanged; `description: null` clears it.
#[derive(ToSchema)]
pub struct ItemUpdateDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
    pub field: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRUD Service API",
        version = "1.0.0",
        description = "A simple CRUD service with JSON file storage"
    ),
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::items::create,
        crate::routes::items::list,
        crate::routes::items::get,
        crate::routes::items::update,
        crate::routes::items::delete,
        crate::routes::items::delete_all,
    ),
    components(
        schemas(
            ItemDoc,
            ItemCreateDoc,
            ItemUpdateDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "root"),
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;
