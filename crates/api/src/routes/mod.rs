pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-in                                    sign in (public)
/// /auth/sign-up                                    sign up (public)
/// /auth/refresh                                    refresh (public)
/// /auth/sign-out                                   sign out (requires auth)
/// /auth/me                                         current profile (requires auth)
///
/// /software                                        list (public)
/// /electronics                                     list (public)
/// /services                                        list (public)
/// /contact                                         submit (public)
///
/// /admin/software                                  create (admin only)
/// /admin/software/{id}                             update, delete
/// /admin/electronics                               create
/// /admin/electronics/{id}                          update, delete
/// /admin/services                                  create
/// /admin/services/{id}                             update, delete
/// /admin/messages                                  list
/// /admin/messages/unread-count                     unread counter
/// /admin/messages/{id}                             delete
/// /admin/messages/{id}/read                        mark read (PUT)
/// /admin/assets/{folder}                           upload image (multipart POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(catalog::router())
        .nest("/admin", admin::router())
}
