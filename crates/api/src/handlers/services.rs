//! Handlers for the `/services` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use techhub_core::error::CoreError;
use techhub_core::types::DbId;
use techhub_db::models::service::{CreateService, Service, UpdateService};
use techhub_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list(&state.pool, params.direction(), params.limit()).await?;
    params.warn_if_truncated("services", services.len());
    Ok(Json(DataResponse { data: services }))
}

/// POST /api/v1/admin/services
///
/// Unknown `icon_name` keys are accepted and render with the default icon.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    input.validate()?;
    let service = ServiceRepo::create(&state.pool, &input).await?;
    tracing::info!(
        service_id = service.id,
        icon = service.icon().key(),
        user_id = admin.user_id,
        "Service created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/v1/admin/services/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<DataResponse<Service>>> {
    input.validate()?;
    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    tracing::info!(service_id = id, user_id = admin.user_id, "Service updated");
    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/v1/admin/services/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ServiceRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(service_id = id, user_id = admin.user_id, "Service deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))
    }
}
