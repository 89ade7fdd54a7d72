//! Handlers for software products (public list + admin CRUD).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use techhub_core::error::CoreError;
use techhub_core::types::DbId;
use techhub_db::models::software::{
    CreateSoftwareProduct, SoftwareProduct, UpdateSoftwareProduct,
};
use techhub_db::repositories::SoftwareRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/software
///
/// Public. `download_link` is only populated for admin callers.
pub async fn list(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<SoftwareProduct>>>> {
    let mut products =
        SoftwareRepo::list(&state.pool, params.direction(), params.limit()).await?;
    params.warn_if_truncated("software_products", products.len());
    if !viewer.is_admin() {
        products = products.into_iter().map(SoftwareProduct::redacted).collect();
    }
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/admin/software
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateSoftwareProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<SoftwareProduct>>)> {
    input.validate()?;
    let product = SoftwareRepo::create(&state.pool, &input).await?;
    tracing::info!(
        product_id = product.id,
        title = %product.title,
        user_id = admin.user_id,
        "Software product created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/admin/software/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSoftwareProduct>,
) -> AppResult<Json<DataResponse<SoftwareProduct>>> {
    input.validate()?;
    let product = SoftwareRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SoftwareProduct",
            id,
        }))?;
    tracing::info!(product_id = id, user_id = admin.user_id, "Software product updated");
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/admin/software/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SoftwareRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SoftwareProduct",
            id,
        }));
    }
    tracing::info!(product_id = id, user_id = admin.user_id, "Software product deleted");
    Ok(StatusCode::NO_CONTENT)
}
