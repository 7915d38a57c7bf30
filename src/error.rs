//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::response::ApiResponse;
use crate::services::{mailer::MailError, ticket_service::TicketError};

/// Application-wide error type.
///
/// Each variant maps to one of three client-visible categories:
///
/// - **Invalid argument** (400): a required field or identifier is missing or malformed
/// - **Not found** (404): the identifier has no matching row
/// - **Internal error** (500): database, mail transport, filesystem or task failure
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (connection, pool acquisition timeout, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No user row matches the requested identifier.
    #[error("User not found")]
    UserNotFound,

    /// Request body or parameters are invalid.
    ///
    /// The String is returned to the client as-is, so it must describe what
    /// was wrong without leaking internals.
    #[error("{0}")]
    InvalidRequest(String),

    /// The mail transport refused or failed to deliver a message.
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Ticket document could not be rendered or written.
    #[error("Ticket error: {0}")]
    Ticket(#[from] TicketError),

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "success": false,
///   "message": "User not found"
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `UserNotFound` → 404 Not Found
/// - everything else → 500 Internal Server Error (details logged, not returned)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Database(_) | AppError::Mail(_) | AppError::Ticket(_) | AppError::Task(_) => {
                tracing::error!(error = %self, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}
