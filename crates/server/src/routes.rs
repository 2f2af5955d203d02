use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, ServiceInfo};
use service::items::ItemStore;

use crate::openapi::ApiDoc;

pub mod items;

/// Shared handler state. Holds only the store handle; item data itself is
/// re-read from disk on every request.
#[derive(Clone)]
pub struct ServerState {
    pub items: Arc<dyn ItemStore>,
}

impl ServerState {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }
}

#[utoipa::path(get, path = "/", tag = "root", responses((status = 200, description = "Service info")))]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: info/health, item CRUD and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let item_routes = Router::new()
        .route(
            "/items",
            get(items::list).post(items::create).delete(items::delete_all),
        )
        .route(
            "/items/:id",
            get(items::get).put(items::update).delete(items::delete),
        );

    public
        .merge(item_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
