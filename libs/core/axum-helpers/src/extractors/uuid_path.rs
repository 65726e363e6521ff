//! UUID path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Extracts the single `{id}` path segment as a [`Uuid`].
///
/// A malformed identifier is rejected with `400 INVALID_ID` before the handler
/// runs, so no lookup is ever attempted for it.
///
/// ```ignore
/// async fn get_category(UuidPath(id): UuidPath) -> String {
///     format!("Category ID: {}", id)
/// }
///
/// let app = Router::new().route("/{id}", get(get_category));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(id.trim())
            .map(UuidPath)
            .map_err(|_| AppError::InvalidId(id).into_response())
    }
}
