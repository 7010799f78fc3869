use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::backend::BackendError;
use crate::models::event_form::FormError;
use crate::utils::response::redirect_with_error;
use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Remote call failed: {context}")]
    RemoteError {
        context: String,
        #[source]
        source: BackendError,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RemoteError { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::RemoteError { .. } => "REMOTE_ERROR",
        }
    }

    /// Text safe to show in the browser.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::RemoteError { context, .. } => context.clone(),
        }
    }

    pub(crate) fn log(&self) {
        let code = self.code();
        match self {
            AppError::ValidationError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => {
                warn!(code, message = %msg, "Request rejected");
            }
            AppError::RemoteError { context, source } => {
                error!(code, error = ?source, message = %context, "Remote call failed");
            }
        }
    }

    /// Server actions report failures by redirecting with an `error` notice.
    pub fn redirect_to(self, path: &str) -> Redirect {
        self.log();
        redirect_with_error(path, &self.public_message())
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub trait RemoteContext<T> {
    /// Wraps a backend failure with the message shown to the user.
    fn remote_context(self, context: &str) -> Result<T, AppError>;
}

impl<T> RemoteContext<T> for Result<T, BackendError> {
    fn remote_context(self, context: &str) -> Result<T, AppError> {
        self.map_err(|source| AppError::RemoteError {
            context: context.to_string(),
            source,
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let body = views::layout::error_page(status, &self.public_message());
        (status, Html(body)).into_response()
    }
}
