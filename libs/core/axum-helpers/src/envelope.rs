//! Success envelope shared by every endpoint.
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "Delete success" }
//! ```
//!
//! List endpoints wrap a [`Paginated`] page in the same envelope.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{success: true, data, message?}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(page: u64, per_page: u64, total: u64, data: Vec<T>) -> Self {
        Self {
            page,
            per_page,
            total,
            data,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

/// Payload returned by DELETE endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub id: String,
}

/// Default `page` query parameter (1-based).
pub fn default_page() -> u64 {
    1
}

/// Default `limit` query parameter.
pub fn default_limit() -> u64 {
    10
}

/// Zero-based offset for a 1-based page; page 0 is treated as page 1.
pub fn page_offset(page: u64, limit: u64) -> u64 {
    page.max(1).saturating_sub(1).saturating_mul(limit)
}
