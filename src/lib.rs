use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::get,
};

use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod repository;
pub mod views;

// Module for routing segregation by resource (Topics, Posts, Accounts).
pub mod routes;
use routes::{accounts, posts, topics};

// --- Public Re-exports ---

// Makes core state types easily accessible to the application entry point.
pub use config::AppConfig;
pub use repository::{PostgresRepository, RepositoryState};

/// AppState
///
/// The single, thread-safe, immutable container holding the application's
/// shared services and configuration, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: abstracts database access via the PgPool connection.
    pub repo: RepositoryState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These let extractors (notably the Actor resolver) pull individual
// components out of the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application's routing structure, applies the observability
/// layers, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Monitoring endpoint for load balancer checks.
        .route("/health", get(|| async { "ok" }))
        .merge(topics::topic_routes())
        .merge(posts::post_routes())
        .merge(accounts::account_routes())
        .with_state(state);

    // Observability and correlation layers (applied outermost).
    base_router.layer(
        ServiceBuilder::new()
            // Generate a unique UUID for every incoming request.
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            // Wrap the request/response lifecycle in a tracing span that
            // carries the request id.
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            // Return the generated x-request-id header to the client.
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Customizes the `TraceLayer` span to include the `x-request-id` header so
/// every log line for a single request is correlated by a unique id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
