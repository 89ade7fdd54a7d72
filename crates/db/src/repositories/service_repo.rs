//! Repository for the `services` table.

use sqlx::PgPool;
use techhub_core::search::Direction;
use techhub_core::types::DbId;

use crate::models::service::{CreateService, Service, UpdateService};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, icon_name, created_at, updated_at";

/// Provides CRUD operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service, returning the created row.
    ///
    /// `icon_name` is stored as given; unknown keys render with the default icon.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (title, description, icon_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(input.title.trim())
            .bind(input.description.trim())
            .bind(input.icon_name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List services ordered by `created_at` in the given direction.
    pub async fn list(
        pool: &PgPool,
        direction: Direction,
        limit: i64,
    ) -> Result<Vec<Service>, sqlx::Error> {
        let dir = direction.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM services
             ORDER BY created_at {dir}, id {dir}
             LIMIT $1"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a service. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                title = COALESCE(BTRIM($2), title),
                description = COALESCE(BTRIM($3), description),
                icon_name = COALESCE(BTRIM($4), icon_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a service by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
