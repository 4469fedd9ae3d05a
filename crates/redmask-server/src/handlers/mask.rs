//! Batch masking endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use redmask_engine::{BatchSummary, LogBatch};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Masked batch plus per-batch totals.
#[derive(Debug, Serialize, Deserialize)]
pub struct MaskResponse {
    #[serde(flatten)]
    pub batch: LogBatch,
    pub summary: BatchSummary,
}

/// POST /v1/logs/mask
///
/// Masks the batch in place. Records or fields whose store calls fail are
/// returned unmasked and counted in `summary.fields_failed`.
pub async fn mask_logs(
    State(state): State<AppState>,
    payload: Result<Json<LogBatch>, JsonRejection>,
) -> Result<Json<MaskResponse>, AppError> {
    let Json(mut batch) =
        payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let summary = state
        .engine()
        .process_batch(&state.call_context(), &mut batch)
        .await;

    info!(
        records = summary.records,
        fields_masked = summary.fields_masked,
        fields_failed = summary.fields_failed,
        bodies_masked = summary.bodies_masked,
        "Batch masked"
    );

    Ok(Json(MaskResponse { batch, summary }))
}
