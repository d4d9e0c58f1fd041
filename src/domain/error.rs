//! Error types for the map autocomplete field.
//!
//! Two error types live here. [`SearchError`] is the only failure the widget
//! models at runtime: it is produced by a search gateway and delivered as a
//! value, never thrown across the widget boundary. [`MapCompleteError`] covers
//! everything around the widget (configuration, themes, I/O, invalid input
//! events) and comes with the [`Result`] alias.

use std::sync::Arc;
use thiserror::Error;

/// A failure reported by a search provider.
///
/// Every variant is treated the same way by the controller: the loading
/// indicator stops, the previous results stay on screen, and the delegate is
/// told. Transient and permanent failures are not distinguished.
///
/// The type is `Clone` so the same error can be recorded in the search state and
/// handed to the delegate. Transport errors keep the original `reqwest::Error`
/// behind an `Arc` as their source.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("network error: {0}")]
    Network(#[source] Arc<reqwest::Error>),

    /// The provider answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The provider answered but the body could not be decoded.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Any other provider-side failure (quota, unresolvable query, simulated
    /// failures from test providers).
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Network(Arc::new(error))
        }
    }
}

/// The crate-level error type.
///
/// Returned by configuration loading, theme loading, and the event handler.
#[derive(Debug, Error)]
pub enum MapCompleteError {
    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A search failed outside the widget's own completion path (for example a
    /// fixture file that could not be loaded).
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// A row selection pointed outside the rows currently shown.
    #[error("Row {index} is out of range for {count} results")]
    InvalidRow {
        /// Selected row index.
        index: usize,
        /// Number of rows in the dropdown.
        count: usize,
    },
}

/// A specialized `Result` type for crate operations.
pub type Result<T> = std::result::Result<T, MapCompleteError>;
