use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::notice::Notice;

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<Html<String>, AppError>`;
/// the body is an inline notice block, never a raw stack of error text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("No identified user")]
    NotIdentified,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Text shown to the user in a toast or inline block.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Transport(_) => {
                "Could not reach WorkHub. Check your connection and try again.".to_string()
            }
            AppError::Backend { message, .. } if !message.is_empty() => message.clone(),
            AppError::Backend { .. } => "The server rejected the request.".to_string(),
            AppError::Decode(_) => "The server sent an unexpected response.".to_string(),
            AppError::MissingData(what) => format!("{what} is not available."),
            AppError::NotIdentified => "Please sign in to continue.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(what) => format!("{what} was not found."),
            AppError::Template(_) | AppError::Internal(_) => {
                "Something went wrong. Please reload the page.".to_string()
            }
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Transport(_) => (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR"),
            AppError::Backend { .. } => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            AppError::Decode(_) => (StatusCode::BAD_GATEWAY, "DECODE_ERROR"),
            AppError::MissingData(_) => (StatusCode::NOT_FOUND, "MISSING_DATA"),
            AppError::NotIdentified => (StatusCode::UNAUTHORIZED, "NOT_IDENTIFIED"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Template(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            AppError::Transport(e) => tracing::error!("Transport error: {e}"),
            AppError::Backend { status, message } => {
                tracing::warn!("Backend error {status}: {message}")
            }
            AppError::Decode(msg) => tracing::error!("Decode error: {msg}"),
            AppError::Template(e) => tracing::error!("Template error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => tracing::debug!("{self}"),
        }

        let notice = Notice::error(self.user_message())
            .render()
            .unwrap_or_else(|_| "<div class=\"toast toast-error\">Error</div>".to_string());
        let body = format!(r#"<div class="error-block" data-code="{code}">{notice}</div>"#);

        (status, Html(body)).into_response()
    }
}
