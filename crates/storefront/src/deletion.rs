//! Confirmed single-row deletion.

use techhub_core::types::DbId;

use crate::context::AppContext;
use crate::error::BackendError;
use crate::notify::{capitalize, Notice};
use crate::records::Record;

/// Out-of-band yes/no prompt shown before anything destructive.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; no request was made.
    Cancelled,
    Deleted,
}

/// Ask for confirmation, then delete one row of `R`'s table.
///
/// Callers re-fetch on [`DeleteOutcome::Deleted`]; nothing is removed
/// locally ahead of the store.
pub async fn confirm_and_delete<R: Record>(
    ctx: &AppContext,
    id: DbId,
    confirm: &dyn Confirm,
) -> Result<DeleteOutcome, BackendError> {
    let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
    if !confirm.confirm(&prompt) {
        return Ok(DeleteOutcome::Cancelled);
    }

    match ctx.backend().delete(R::TABLE, id).await {
        Ok(()) => {
            tracing::info!(table = R::TABLE.name(), id, "Row deleted");
            ctx.notify(Notice::success(format!("{} deleted successfully", capitalize(R::NOUN))));
            Ok(DeleteOutcome::Deleted)
        }
        Err(e) => {
            tracing::warn!(table = R::TABLE.name(), id, error = %e, "Delete failed");
            ctx.notify(
                Notice::error(format!("Failed to delete {}", R::NOUN))
                    .with_description(e.to_string()),
            );
            Err(e)
        }
    }
}
