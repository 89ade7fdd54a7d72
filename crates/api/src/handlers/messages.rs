//! Admin handlers for the contact inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use techhub_core::error::CoreError;
use techhub_core::types::DbId;
use techhub_db::models::contact_message::ContactMessage;
use techhub_db::repositories::ContactMessageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// GET /api/v1/admin/messages
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ContactMessage>>>> {
    let messages =
        ContactMessageRepo::list(&state.pool, params.direction(), params.limit()).await?;
    params.warn_if_truncated("contact_messages", messages.len());
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/v1/admin/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let unread = ContactMessageRepo::count_unread(&state.pool).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread },
    }))
}

/// PUT /api/v1/admin/messages/{id}/read
///
/// One-way and idempotent: a read message stays read.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let message = ContactMessageRepo::mark_read(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))?;
    tracing::debug!(message_id = id, user_id = admin.user_id, "Contact message marked read");
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/admin/messages/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactMessageRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }));
    }
    tracing::info!(message_id = id, user_id = admin.user_id, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
