use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Post Router Module
///
/// The post CRUD lifecycle, nested under its owning topic. There is no
/// authentication middleware on these routes on purpose: guests may read,
/// and every mutating handler consults the policy itself so that a denial
/// can resolve as a redirect to the read-only view instead of a 401/403.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        // GET /topics/{topicId}/posts/new
        // Creation form; guests are redirected to the topic view.
        .route("/topics/{topic_id}/posts/new", get(handlers::new_post))
        // POST /topics/{topicId}/posts/create
        .route("/topics/{topic_id}/posts/create", post(handlers::create_post))
        // GET /topics/{topicId}/posts/{id}
        // Read-only post view, the landing page for every soft deny.
        .route("/topics/{topic_id}/posts/{post_id}", get(handlers::show_post))
        // GET /topics/{topicId}/posts/{id}/edit
        .route("/topics/{topic_id}/posts/{post_id}/edit", get(handlers::edit_post))
        // POST /topics/{topicId}/posts/{id}/update
        .route("/topics/{topic_id}/posts/{post_id}/update", post(handlers::update_post))
        // POST /topics/{topicId}/posts/{id}/destroy
        .route("/topics/{topic_id}/posts/{post_id}/destroy", post(handlers::destroy_post))
}
