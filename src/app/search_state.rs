//! Search state machine types.
//!
//! Exactly one [`SearchState`] is live per field. Each text change that passes
//! the length gate mints a fresh [`QueryToken`], and only the completion
//! carrying the current token may update what the user sees.
//!
//! ```text
//! Idle ──(text longer than threshold)──▶ Pending(query)
//! Pending ──(current token resolves Ok)──▶ Succeeded(results)
//! Pending ──(current token resolves Err)──▶ Failed(error)
//! any ──(row selected)──▶ Idle
//! ```

use crate::domain::{PlaceResult, SearchError};
use serde::{Deserialize, Serialize};

/// Marker identifying the most recently issued search.
///
/// Tokens only move forward. A completion whose token differs from the
/// current one belongs to superseded work and is discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QueryToken(u64);

impl QueryToken {
    /// The token before any search was issued.
    #[must_use]
    pub const fn initial() -> Self {
        Self(0)
    }

    /// The token following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value, for logging.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for QueryToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the current search.
#[derive(Debug, Clone, Default)]
pub enum SearchState {
    /// No search has been issued, or the last one was settled by a selection.
    #[default]
    Idle,

    /// A search for the given text is in flight.
    Pending(String),

    /// The current search returned these results, in provider order.
    Succeeded(Vec<PlaceResult>),

    /// The current search failed.
    Failed(SearchError),
}

impl SearchState {
    /// Whether a search is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Query text of the in-flight search, if any.
    #[must_use]
    pub fn pending_query(&self) -> Option<&str> {
        match self {
            Self::Pending(query) => Some(query),
            _ => None,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending(_) => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}
