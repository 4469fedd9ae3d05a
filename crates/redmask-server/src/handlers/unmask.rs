//! Reverse lookup endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use redmask_core::Category;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct UnmaskResponse {
    pub category: String,
    pub masked: String,
    pub original: String,
}

/// GET /v1/unmask/{category}/{masked}
///
/// Returns 404 when no reverse entry exists, which includes entries that
/// expired or whose reverse write failed.
pub async fn unmask_value(
    State(state): State<AppState>,
    Path((category, masked)): Path<(String, String)>,
) -> Result<Json<UnmaskResponse>, AppError> {
    let original = state
        .engine()
        .store()
        .lookup_original(&state.call_context(), &masked, &Category::new(category.as_str()))
        .await?;

    match original {
        Some(original) => Ok(Json(UnmaskResponse {
            category,
            masked,
            original,
        })),
        None => Err(AppError::NotFound { category, masked }),
    }
}
