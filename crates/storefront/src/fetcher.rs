//! Loading a whole collection for display.
//!
//! Public pages never render empty because of the store: a failed request
//! is replaced by the record type's sample rows with exactly one warning
//! notice, and an empty answer is replaced silently for catalogs that opt
//! in. Admin views see the store as it is and get an error notice instead;
//! they load only for a signed-in admin session. There is no retry; the
//! caller re-fetches explicitly.

use techhub_core::fetch::{FallbackReason, FetchOutcome};

use crate::backend::ListQuery;
use crate::context::AppContext;
use crate::error::BackendError;
use crate::notify::Notice;
use crate::records::{list_records, Record};

/// Lifecycle of a collection on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(FetchOutcome<T>),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Rows to render; empty while loading.
    pub fn rows(&self) -> &[T] {
        match self {
            FetchState::Loading => &[],
            FetchState::Ready(outcome) => outcome.rows(),
        }
    }

    pub fn outcome(&self) -> Option<&FetchOutcome<T>> {
        match self {
            FetchState::Loading => None,
            FetchState::Ready(outcome) => Some(outcome),
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

/// Fetch `R` for a public page. Never fails.
pub async fn fetch_public<R: Record>(ctx: &AppContext, query: ListQuery) -> FetchOutcome<R> {
    match list_records::<R>(ctx.backend(), query).await {
        Ok(rows) if rows.is_empty() && R::SAMPLES_WHEN_EMPTY => {
            tracing::debug!(table = R::TABLE.name(), "No rows stored; showing samples");
            FetchOutcome::Fallback {
                rows: R::samples(),
                reason: FallbackReason::Empty,
            }
        }
        Ok(rows) => FetchOutcome::Live(rows),
        Err(e) => {
            tracing::error!(table = R::TABLE.name(), error = %e, "Fetch failed; showing samples");
            ctx.notify(
                Notice::warning(format!("Error fetching {}", R::PLURAL)).with_description(format!(
                    "Could not load {}. Falling back to sample data.",
                    R::PLURAL
                )),
            );
            FetchOutcome::Fallback {
                rows: R::samples(),
                reason: FallbackReason::Unavailable(e.to_string()),
            }
        }
    }
}

/// Fetch `R` for an admin view. Failures are reported and returned.
///
/// Without an admin session nothing is sent: an "Access denied" notice is
/// published and [`BackendError::Denied`] returned.
pub async fn fetch_admin<R: Record>(
    ctx: &AppContext,
    query: ListQuery,
) -> Result<Vec<R>, BackendError> {
    if let Err(denial) = ctx.session().admin_access() {
        tracing::warn!(table = R::TABLE.name(), %denial, "Admin view refused");
        ctx.notify(Notice::error("Access denied").with_description(denial.to_string()));
        return Err(denial.into());
    }
    list_records::<R>(ctx.backend(), query).await.inspect_err(|e| {
        tracing::error!(table = R::TABLE.name(), error = %e, "Admin fetch failed");
        ctx.notify(
            Notice::error(format!("Error loading {}", R::PLURAL)).with_description(e.to_string()),
        );
    })
}
