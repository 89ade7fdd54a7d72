//! Public catalog and contact routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{contact, electronics, services, software};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/software", get(software::list))
        .route("/electronics", get(electronics::list))
        .route("/services", get(services::list))
        .route("/contact", post(contact::submit))
}
