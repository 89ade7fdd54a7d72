//! Admin inbox for contact-form messages.
//!
//! Opening an unread message shows it immediately and flips `is_read` in
//! the background. Only the local copy of that one row is updated when
//! the flip succeeds; the list is not re-fetched. If the inbox has been
//! dropped by the time the response arrives, the response is discarded.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde_json::json;
use techhub_core::types::DbId;
use techhub_db::models::contact_message::ContactMessage;
use tokio::task::JoinHandle;

use crate::backend::{ListQuery, Table};
use crate::context::AppContext;
use crate::deletion::{confirm_and_delete, Confirm, DeleteOutcome};
use crate::error::BackendError;
use crate::fetcher::fetch_admin;
use crate::notify::Notice;

#[derive(Debug, Default)]
struct InboxState {
    messages: Vec<ContactMessage>,
    loading: bool,
    open: Option<DbId>,
    /// Ids with a read flip in flight.
    marking: HashSet<DbId>,
}

pub struct MessageInbox {
    ctx: AppContext,
    state: Arc<Mutex<InboxState>>,
}

fn lock(state: &Mutex<InboxState>) -> MutexGuard<'_, InboxState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MessageInbox {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: Arc::new(Mutex::new(InboxState {
                loading: true,
                ..Default::default()
            })),
        }
    }

    /// Fetch every message, newest first. Never falls back to samples.
    pub async fn load(&self) -> Result<(), BackendError> {
        lock(&self.state).loading = true;
        let result = fetch_admin::<ContactMessage>(&self.ctx, ListQuery::newest_first()).await;
        let mut state = lock(&self.state);
        state.loading = false;
        state.messages = result?;
        Ok(())
    }

    pub fn messages(&self) -> Vec<ContactMessage> {
        lock(&self.state).messages.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn unread_count(&self) -> usize {
        lock(&self.state).messages.iter().filter(|m| !m.is_read).count()
    }

    /// The message shown in the detail view.
    pub fn open_message(&self) -> Option<ContactMessage> {
        let state = lock(&self.state);
        let id = state.open?;
        state.messages.iter().find(|m| m.id == id).cloned()
    }

    /// Show message `id`. If it is unread, a background task marks it
    /// read; its handle is returned. `None` when there is nothing to mark
    /// (already read, unknown id, or a flip already in flight).
    pub fn view(&self, id: DbId) -> Option<JoinHandle<()>> {
        {
            let mut state = lock(&self.state);
            let message = state.messages.iter().find(|m| m.id == id)?;
            let unread = !message.is_read;
            state.open = Some(id);
            if !unread || !state.marking.insert(id) {
                return None;
            }
        }

        let ctx = self.ctx.clone();
        let weak = Arc::downgrade(&self.state);
        Some(tokio::spawn(mark_read(ctx, weak, id)))
    }

    /// Close the detail view.
    pub fn close(&self) {
        lock(&self.state).open = None;
    }

    /// Confirm, delete, close the detail view if it showed this message,
    /// then re-fetch.
    pub async fn delete(
        &self,
        id: DbId,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, BackendError> {
        let outcome = confirm_and_delete::<ContactMessage>(&self.ctx, id, confirm).await?;
        if outcome == DeleteOutcome::Deleted {
            {
                let mut state = lock(&self.state);
                if state.open == Some(id) {
                    state.open = None;
                }
            }
            let _ = self.load().await;
        }
        Ok(outcome)
    }
}

async fn mark_read(ctx: AppContext, state: Weak<Mutex<InboxState>>, id: DbId) {
    let result = ctx
        .backend()
        .update(Table::ContactMessages, id, json!({ "is_read": true }))
        .await;

    let Some(shared) = state.upgrade() else {
        tracing::debug!(id, "Inbox closed before read flip finished; discarding result");
        return;
    };
    let mut state = lock(&shared);
    state.marking.remove(&id);

    match result {
        Ok(_) => {
            if let Some(message) = state.messages.iter_mut().find(|m| m.id == id) {
                message.is_read = true;
            }
            tracing::debug!(id, "Message marked read");
        }
        Err(e) => {
            drop(state);
            tracing::warn!(id, error = %e, "Failed to mark message as read");
            ctx.notify(
                Notice::error("Failed to mark message as read").with_description(e.to_string()),
            );
        }
    }
}
