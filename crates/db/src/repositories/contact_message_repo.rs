//! Repository for the `contact_messages` table.

use sqlx::PgPool;
use techhub_core::search::Direction;
use techhub_core::types::DbId;

use crate::models::contact_message::{ContactMessage, CreateContactMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, subject, message, is_read, created_at";

/// Provides operations for contact-form messages.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Insert a new, unread message.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.subject.trim())
            .bind(input.message.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_messages WHERE id = $1");
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List messages ordered by `created_at` in the given direction.
    pub async fn list(
        pool: &PgPool,
        direction: Direction,
        limit: i64,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let dir = direction.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM contact_messages
             ORDER BY created_at {dir}, id {dir}
             LIMIT $1"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark a message as read. Idempotent; a read message stays read.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_messages SET is_read = true
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a message by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of messages not yet opened by an admin.
    pub async fn count_unread(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE NOT is_read")
            .fetch_one(pool)
            .await
    }
}
