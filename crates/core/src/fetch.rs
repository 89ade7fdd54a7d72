//! Result of loading a collection for display.
//!
//! A page never renders empty because of a backend hiccup: when the live
//! request fails, or comes back with nothing for a public catalog, the
//! rows are replaced by a fixed sample set. [`FetchOutcome`] records which
//! branch was taken so callers (and tests) can tell them apart.

use serde::{Deserialize, Serialize};

/// Why sample rows are being shown instead of live ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The store answered successfully but had no rows.
    Empty,
    /// The request failed; carries the error message.
    Unavailable(String),
}

/// Rows loaded for a collection, tagged with their provenance.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Live(Vec<T>),
    Fallback { rows: Vec<T>, reason: FallbackReason },
}

impl<T> FetchOutcome<T> {
    pub fn rows(&self) -> &[T] {
        match self {
            FetchOutcome::Live(rows) => rows,
            FetchOutcome::Fallback { rows, .. } => rows,
        }
    }

    pub fn rows_mut(&mut self) -> &mut Vec<T> {
        match self {
            FetchOutcome::Live(rows) => rows,
            FetchOutcome::Fallback { rows, .. } => rows,
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            FetchOutcome::Live(rows) => rows,
            FetchOutcome::Fallback { rows, .. } => rows,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FetchOutcome::Live(_))
    }

    pub fn is_fallback(&self) -> bool {
        !self.is_live()
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            FetchOutcome::Live(_) => None,
            FetchOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn live_exposes_rows() {
        let outcome = FetchOutcome::Live(vec![1, 2, 3]);
        assert!(outcome.is_live());
        assert_eq!(outcome.rows(), &[1, 2, 3]);
        assert!(outcome.fallback_reason().is_none());
    }

    #[test]
    fn fallback_keeps_reason() {
        let outcome = FetchOutcome::Fallback {
            rows: vec!["sample"],
            reason: FallbackReason::Unavailable("connection refused".into()),
        };
        assert!(outcome.is_fallback());
        assert_matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::Unavailable(msg)) if msg == "connection refused"
        );
        assert_eq!(outcome.into_rows(), vec!["sample"]);
    }
}
