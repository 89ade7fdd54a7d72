//! User-facing notifications.
//!
//! [`Notifier`] is a small fan-out hub over a `tokio::sync::broadcast`
//! channel. Whatever renders toasts subscribes to it; every notice is
//! also written to the log so operators see the same thing users do.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A non-blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 64;

pub struct Notifier {
    sender: broadcast::Sender<Notice>,
}

impl Notifier {
    /// When the buffer is full the oldest notices are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Log `notice` and deliver it to every current subscriber.
    pub fn publish(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or_default();
        match notice.level {
            NoticeLevel::Error => tracing::error!(title = %notice.title, description, "Notice"),
            NoticeLevel::Warning => tracing::warn!(title = %notice.title, description, "Notice"),
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(title = %notice.title, description, "Notice")
            }
        }
        // A send error only means nobody is listening.
        let _ = self.sender.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// `"product"` -> `"Product"`, for notice titles.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
