//! Request extractors whose rejections use the JSON error body.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::JsonApiError;

/// `Json<T>` that rejects with [`JsonApiError`]. Shape errors are 422 and
/// name the offending field when it can be recovered from the message.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> JsonApiError {
    let detail = rejection.body_text();
    match rejection {
        JsonRejection::JsonDataError(_) => {
            let err = JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(detail.clone()));
            match offending_field(&detail) {
                Some(field) => err.with_field(field),
                None => err,
            }
        }
        JsonRejection::JsonSyntaxError(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail)),
        JsonRejection::MissingJsonContentType(_) => {
            JsonApiError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type", Some(detail))
        }
        other => JsonApiError::new(other.status(), "Bad Request", Some(detail)),
    }
}

// axum reports data errors as "<prefix>: [<path>: ]<serde message>"; a missing
// field only shows up in the serde message itself.
fn offending_field(detail: &str) -> Option<String> {
    let message = detail.split_once("target type: ").map_or(detail, |(_, m)| m);
    if let Some((_, rest)) = message.split_once("missing field `") {
        return rest.split('`').next().filter(|f| !f.is_empty()).map(str::to_string);
    }
    let (path, _) = message.split_once(": ")?;
    let simple = !path.is_empty() && path.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    simple.then(|| path.to_string())
}

/// `{id}` path segment of `/items/{id}`.
///
/// Not an integer: 422 on `id`. A negative integer names an item that cannot
/// exist, so it is reported as not found.
pub struct ItemId(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        parse_item_id(&raw).map(ItemId)
    }
}

fn path_rejection(rejection: PathRejection) -> JsonApiError {
    JsonApiError::new(rejection.status(), "Bad Request", Some(rejection.body_text()))
}

fn parse_item_id(raw: &str) -> Result<u64, JsonApiError> {
    if let Ok(id) = raw.parse::<u64>() {
        return Ok(id);
    }
    if raw.parse::<i64>().is_ok() {
        return Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("Item with ID {raw} not found")),
        ));
    }
    Err(JsonApiError::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Validation Error",
        Some(format!("id must be an integer, got {raw:?}")),
    )
    .with_field("id"))
}
