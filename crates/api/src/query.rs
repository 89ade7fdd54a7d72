//! Shared query parameter types for API handlers.

use serde::Deserialize;
use techhub_core::search::{
    clamp_limit, hit_list_ceiling, Direction, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};

/// `?direction=asc|desc&limit=` accepted by every list endpoint.
///
/// Lists are ordered on `created_at`, newest first unless asked otherwise.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub direction: Option<Direction>,
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }

    /// Requested limit clamped to `1..=MAX_LIST_LIMIT`.
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)
    }

    /// Log when an unlimited list was cut at the ceiling.
    pub fn warn_if_truncated(&self, table: &str, returned: usize) {
        if hit_list_ceiling(self.limit, returned) {
            tracing::warn!(table, returned, "List reached the row ceiling; older rows omitted");
        }
    }
}
