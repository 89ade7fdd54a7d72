//! Repository for the `electronics_products` table.

use sqlx::PgPool;
use techhub_core::search::Direction;
use techhub_core::types::DbId;

use crate::models::electronics::{
    CreateElectronicsProduct, ElectronicsProduct, UpdateElectronicsProduct,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, image_url, price, size, \
                       download_link, created_at, updated_at";

/// Provides CRUD operations for electronics products.
pub struct ElectronicsRepo;

impl ElectronicsRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateElectronicsProduct,
    ) -> Result<ElectronicsProduct, sqlx::Error> {
        let query = format!(
            "INSERT INTO electronics_products
                (title, description, category, image_url, price, size, download_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ElectronicsProduct>(&query)
            .bind(input.title.trim())
            .bind(input.description.trim())
            .bind(input.category.trim())
            .bind(input.image_url())
            .bind(input.price)
            .bind(input.size.trim())
            .bind(input.download_link())
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ElectronicsProduct>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM electronics_products WHERE id = $1");
        sqlx::query_as::<_, ElectronicsProduct>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products ordered by `created_at` in the given direction.
    pub async fn list(
        pool: &PgPool,
        direction: Direction,
        limit: i64,
    ) -> Result<Vec<ElectronicsProduct>, sqlx::Error> {
        let dir = direction.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM electronics_products
             ORDER BY created_at {dir}, id {dir}
             LIMIT $1"
        );
        sqlx::query_as::<_, ElectronicsProduct>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateElectronicsProduct,
    ) -> Result<Option<ElectronicsProduct>, sqlx::Error> {
        let query = format!(
            "UPDATE electronics_products SET
                title = COALESCE(BTRIM($2), title),
                description = COALESCE(BTRIM($3), description),
                category = COALESCE(BTRIM($4), category),
                image_url = CASE WHEN $5::TEXT IS NULL THEN image_url
                    ELSE NULLIF(BTRIM($5), '') END,
                price = COALESCE($6, price),
                size = COALESCE(BTRIM($7), size),
                download_link = CASE WHEN $8::TEXT IS NULL THEN download_link
                    ELSE NULLIF(BTRIM($8), '') END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ElectronicsProduct>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(input.price)
            .bind(&input.size)
            .bind(&input.download_link)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM electronics_products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
