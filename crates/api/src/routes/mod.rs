pub mod health;
pub mod search;

use crate::error::ApiError;
use axum::http::Uri;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Cannot GET {}", uri.path()))
}
