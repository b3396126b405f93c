pub mod anime;
pub mod guestbook;
pub mod music;

use axum::{Json, extract::rejection::QueryRejection, http::StatusCode};

use crate::domain::errors::ProxyError;
use crate::interface_adapters::protocol::ErrorResponse;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

// Helper to build a JSON error response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            details: None,
        }),
    )
}

// Malformed query strings get the same JSON envelope as every other error.
pub(crate) fn reject_query(rejection: QueryRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "rejected query string");
    error_response(StatusCode::BAD_REQUEST, "Invalid query string")
}

// Upstream statuses pass through; everything else is a server-side failure.
pub(crate) fn map_proxy_error(err: ProxyError) -> ApiError {
    match err {
        ProxyError::MissingConfiguration(message) => {
            tracing::error!(%message, "proxy is not configured");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
        ProxyError::TokenExchange => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        ProxyError::Upstream {
            status,
            message,
            details,
        } => {
            tracing::error!(status, %message, "upstream request failed");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(ErrorResponse {
                    error: message,
                    details,
                }),
            )
        }
        ProxyError::Transport(_) | ProxyError::Decode(_) => {
            tracing::error!(error = %err, "upstream request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
