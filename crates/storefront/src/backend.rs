//! The backing store as seen by the storefront.
//!
//! [`Backend`] is deliberately untyped (rows travel as JSON values) so a
//! single object-safe trait covers every table. Typed access lives in
//! [`crate::records`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use techhub_core::search::Direction;
use techhub_core::types::DbId;
use techhub_db::models::user::Profile;

use crate::context::SessionState;
use crate::error::BackendError;

/// The collections the storefront reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Software,
    Electronics,
    Services,
    ContactMessages,
}

impl Table {
    /// Name of the underlying database table.
    pub fn name(self) -> &'static str {
        match self {
            Table::Software => "software_products",
            Table::Electronics => "electronics_products",
            Table::Services => "services",
            Table::ContactMessages => "contact_messages",
        }
    }
}

/// Ordering and size of a list request. Rows are always ordered by
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub direction: Direction,
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Every row, newest first.
    pub fn newest_first() -> Self {
        Self {
            direction: Direction::Desc,
            limit: None,
        }
    }

    pub fn oldest_first() -> Self {
        Self {
            direction: Direction::Asc,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::newest_first()
    }
}

/// A signed-in session as returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: Profile,
}

/// A stored image and where it can be fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub bucket: String,
    pub path: String,
    pub public_url: String,
}

/// Request/response contract of the backing store.
///
/// Authorization is enforced by the implementation, not by callers: a
/// non-admin session calling a mutating method gets a rejection back.
#[async_trait]
pub trait Backend: Send + Sync {
    /// All rows of `table` in creation order.
    async fn list(&self, table: Table, query: ListQuery) -> Result<Vec<Value>, BackendError>;

    /// Insert one row, returning it as stored.
    async fn insert(&self, table: Table, record: Value) -> Result<Value, BackendError>;

    /// Apply `patch` to the row with `id`, returning it as stored.
    async fn update(&self, table: Table, id: DbId, patch: Value) -> Result<Value, BackendError>;

    async fn delete(&self, table: Table, id: DbId) -> Result<(), BackendError>;

    /// Store an image under `folder`. The store picks a collision-free
    /// object name derived from `file_name`.
    async fn upload_asset(
        &self,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedAsset, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// Trade a refresh token for a new session. The presented token is
    /// revoked whether or not the caller keeps the new one.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError>;

    /// Register an account. No session is started; the caller signs in
    /// separately.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Profile, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Hand over the session a backend should keep current when it renews
    /// tokens on its own. Called once by [`crate::context::AppContext::init`].
    fn bind_session(&self, _session: SessionState) {}
}
