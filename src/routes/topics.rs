use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Topic Router Module
///
/// Read routes are open to everyone, guests included. Creation applies the
/// policy inside the handler (guests get redirected, nothing persisted).
pub fn topic_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // The home page doubles as the topic index.
        .route("/", get(handlers::list_topics))
        // GET /topics
        .route("/topics", get(handlers::list_topics))
        // POST /topics/create
        // Signed-in users create a topic; validation failures and guest
        // requests resolve to a flash + redirect with no record.
        .route("/topics/create", post(handlers::create_topic))
        // GET /topics/{id}
        // Topic view listing its posts in creation order.
        .route("/topics/{topic_id}", get(handlers::show_topic))
}
