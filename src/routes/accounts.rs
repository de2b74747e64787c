use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Account Router Module
///
/// Registration and session endpoints. All of these are public by nature;
/// the session cookie set here is what later resolves a request's `Actor`.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        // GET /users/sign_up
        .route("/users/sign_up", get(handlers::sign_up_form))
        // POST /users
        // Registration; establishes a session on success.
        .route("/users", post(handlers::register))
        // GET /users/sign_in
        .route("/users/sign_in", get(handlers::sign_in_form))
        // POST /users/sign_in
        .route("/users/sign_in", post(handlers::sign_in))
        // GET /users/sign_out
        // Terminates the session and redirects home.
        .route("/users/sign_out", get(handlers::sign_out))
}
