//! Handler for the public contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use techhub_db::models::contact_message::{ContactMessage, CreateContactMessage};
use techhub_db::repositories::ContactMessageRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/contact
///
/// Anyone may submit. The stored message starts unread.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactMessage>>)> {
    input.validate()?;
    let message = ContactMessageRepo::create(&state.pool, &input).await?;
    tracing::info!(message_id = message.id, subject = %message.subject, "Contact message received");
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}
