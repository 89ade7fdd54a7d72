//! List sizing helpers shared by the list endpoints.

/// Default number of rows returned by a list endpoint.
///
/// Catalog lists are unpaginated; this is only a safety ceiling, far above
/// any catalog or inbox the shop is expected to hold. A list that reaches
/// it is logged (see [`hit_list_ceiling`]).
pub const DEFAULT_LIST_LIMIT: i64 = 10_000;

/// Maximum number of rows a caller may request.
pub const MAX_LIST_LIMIT: i64 = 10_000;

/// Number of rows shown per featured-products tab.
pub const FEATURED_LIMIT: i64 = 3;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Whether a list requested without a limit came back at the server's
/// ceiling, in which case older rows may be missing from it.
pub fn hit_list_ceiling(requested: Option<i64>, returned: usize) -> bool {
    requested.is_none() && i64::try_from(returned).unwrap_or(i64::MAX) >= DEFAULT_LIST_LIMIT
}

/// Sort direction on `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl Direction {
    /// SQL keyword for an `ORDER BY` clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
