use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use redmask_engine::StoreError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    /// No existe mapping inverso para el valor enmascarado
    NotFound { category: String, masked: String },

    /// Parametros invalidos
    BadRequest(String),

    /// Fallo del store
    Store(StoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::NotFound { category, masked } => (
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("No original value recorded for {}/{}", category, masked),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::Store(err) if err.is_interrupted() => (
                StatusCode::GATEWAY_TIMEOUT,
                "Gateway Timeout",
                err.to_string(),
            ),
            AppError::Store(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                err.to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
