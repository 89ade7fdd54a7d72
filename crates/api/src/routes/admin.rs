//! Admin-only routes. Every handler behind these takes `RequireAdmin`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{assets, electronics, messages, services, software};
use crate::state::AppState;

/// Routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        // Software
        .route("/software", post(software::create))
        .route(
            "/software/{id}",
            put(software::update).delete(software::delete),
        )
        // Electronics
        .route("/electronics", post(electronics::create))
        .route(
            "/electronics/{id}",
            put(electronics::update).delete(electronics::delete),
        )
        // Services
        .route("/services", post(services::create))
        .route(
            "/services/{id}",
            put(services::update).delete(services::delete),
        )
        // Contact inbox
        .route("/messages", get(messages::list))
        .route("/messages/unread-count", get(messages::unread_count))
        .route("/messages/{id}", axum::routing::delete(messages::delete))
        .route("/messages/{id}/read", put(messages::mark_read))
        // Uploads
        .route("/assets/{folder}", post(assets::upload))
}
