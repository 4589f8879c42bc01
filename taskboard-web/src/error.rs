/// Error handling for the web server
///
/// This module provides a unified error type that maps to HTML responses.
/// Handlers return `Result<T, PageError>` and rely on the `IntoResponse`
/// impl for the final page.
///
/// The mapping:
///
/// - `Validation` → 422 page (handlers usually re-render the form with
///   inline errors before an error ever reaches this type)
/// - `NotFound` → 404 page
/// - `Forbidden` → 403 page, with no detail about the resource
/// - `Unauthenticated` → 303 redirect to the login page
/// - `Internal` → 500 page; the cause is logged, never shown

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;
use taskboard_shared::auth::password::PasswordError;
use taskboard_shared::models::task::TaskError;
use taskboard_shared::models::user::UserError;

use crate::views;

/// Page result type alias
pub type PageResult<T> = Result<T, PageError>;

/// Unified error type for page handlers
#[derive(Debug)]
pub enum PageError {
    /// A field constraint was violated at the store boundary (422)
    Validation(String),

    /// Referenced task does not exist (404)
    NotFound,

    /// Authenticated but not the owner (403)
    Forbidden,

    /// No valid session; redirect to login
    Unauthenticated,

    /// Internal server error (500)
    Internal(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            PageError::NotFound => write!(f, "Not found"),
            PageError::Forbidden => write!(f, "Forbidden"),
            PageError::Unauthenticated => write!(f, "Not logged in"),
            PageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            // Redirect-equivalent rejection: never render task pages to
            // an unauthenticated request.
            PageError::Unauthenticated => Redirect::to("/login/").into_response(),

            PageError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::error_page("Invalid input", &msg)),
            )
                .into_response(),

            PageError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(views::error_page("Not found", "That task does not exist.")),
            )
                .into_response(),

            // Deliberately vague: a non-owner learns nothing about the
            // task beyond the fact that it is not theirs.
            PageError::Forbidden => (
                StatusCode::FORBIDDEN,
                Html(views::error_page(
                    "Access denied",
                    "You do not have permission to view this task.",
                )),
            )
                .into_response(),

            PageError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page(
                        "Something went wrong",
                        "An internal error occurred. Please try again later.",
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Convert task store errors to page errors
impl From<TaskError> for PageError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(msg) => PageError::Validation(msg),
            TaskError::NotFound => PageError::NotFound,
            TaskError::Forbidden => PageError::Forbidden,
            TaskError::Database(e) => PageError::Internal(format!("Database error: {}", e)),
        }
    }
}

/// Convert user store errors to page errors
///
/// Duplicate usernames are normally intercepted by the register handler
/// to re-render the form; this mapping is the fallback.
impl From<UserError> for PageError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUsername => {
                PageError::Validation("That username is already taken".to_string())
            }
            UserError::Database(e) => PageError::Internal(format!("Database error: {}", e)),
        }
    }
}

/// Convert raw sqlx errors to page errors
impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PageError::NotFound,
            _ => PageError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password hashing errors to page errors
impl From<PasswordError> for PageError {
    fn from(err: PasswordError) -> Self {
        PageError::Internal(format!("Password operation failed: {}", err))
    }
}
