//! Handlers for electronics products (public list + admin CRUD).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use techhub_core::error::CoreError;
use techhub_core::types::DbId;
use techhub_db::models::electronics::{
    CreateElectronicsProduct, ElectronicsProduct, UpdateElectronicsProduct,
};
use techhub_db::repositories::ElectronicsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/electronics
///
/// Public. Rows carry `price` so the client can derive its slider bounds;
/// `download_link` is only populated for admin callers.
pub async fn list(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ElectronicsProduct>>>> {
    let mut products =
        ElectronicsRepo::list(&state.pool, params.direction(), params.limit()).await?;
    params.warn_if_truncated("electronics_products", products.len());
    if !viewer.is_admin() {
        products = products.into_iter().map(ElectronicsProduct::redacted).collect();
    }
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/admin/electronics
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateElectronicsProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<ElectronicsProduct>>)> {
    input.validate()?;
    let product = ElectronicsRepo::create(&state.pool, &input).await?;
    tracing::info!(
        product_id = product.id,
        title = %product.title,
        price = product.price,
        user_id = admin.user_id,
        "Electronics product created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/admin/electronics/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateElectronicsProduct>,
) -> AppResult<Json<DataResponse<ElectronicsProduct>>> {
    input.validate()?;
    let product = ElectronicsRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ElectronicsProduct",
            id,
        }))?;
    tracing::info!(product_id = id, user_id = admin.user_id, "Electronics product updated");
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/admin/electronics/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ElectronicsRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ElectronicsProduct",
            id,
        }));
    }
    tracing::info!(product_id = id, user_id = admin.user_id, "Electronics product deleted");
    Ok(StatusCode::NO_CONTENT)
}
