//! Startup seeding of the operator account.

use techhub_db::models::user::User;
use techhub_db::repositories::UserRepo;
use techhub_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Ensure the configured account exists and carries the admin flag.
///
/// Re-running with a different password replaces the stored hash.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<User> {
    let hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::upsert_admin(pool, &admin.email, &hash).await?;
    tracing::info!(user_id = user.id, email = %user.email, "Admin account ensured");
    Ok(user)
}
