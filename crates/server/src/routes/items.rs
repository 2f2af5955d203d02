use axum::{extract::State, http::StatusCode, Json};
use models::{Item, ItemCreate, ItemUpdate};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ItemId};
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/items", tag = "items",
    request_body = crate::openapi::ItemCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<ItemCreate>,
) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    let item = state.items.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get, path = "/items", tag = "items",
    responses((status = 200, description = "All items", body = [crate::openapi::ItemDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Item>> {
    let items = state.items.read_all().await;
    info!(count = items.len(), "list items");
    Json(items)
}

#[utoipa::path(
    get, path = "/items/{id}", tag = "items",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ItemId(id): ItemId,
) -> Result<Json<Item>, JsonApiError> {
    Ok(Json(state.items.read_one(id).await?))
}

#[utoipa::path(
    put, path = "/items/{id}", tag = "items",
    params(("id" = u64, Path, description = "Item ID")),
    request_body = crate::openapi::ItemUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ItemId(id): ItemId,
    ApiJson(input): ApiJson<ItemUpdate>,
) -> Result<Json<Item>, JsonApiError> {
    Ok(Json(state.items.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/items/{id}", tag = "items",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ItemId(id): ItemId,
) -> Result<StatusCode, JsonApiError> {
    state.items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/items", tag = "items",
    responses((status = 204, description = "All items deleted"))
)]
pub async fn delete_all(State(state): State<ServerState>) -> Result<StatusCode, JsonApiError> {
    state.items.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
