use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// AppError
///
/// Infrastructure faults only. Validation failures and authorization denials
/// never take this path: they are normal outcomes resolved with a flash and
/// a redirect. Anything that does land here is logged and answered with a
/// generic error page so one request's failure never takes down another.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed")]
    PasswordHash,

    #[error("session token error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:?}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1><p>Please try again later.</p>".to_string()),
        )
            .into_response()
    }
}
