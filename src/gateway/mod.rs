//! Search gateways: the asynchronous bridge to a place search provider.
//!
//! A gateway turns a natural-language query into a lazy future resolving to an
//! ordered list of [`PlaceResult`]s or a [`SearchError`]. Gateways make exactly
//! one attempt per call, never retry, and never deduplicate. Deciding which
//! answer is still wanted is the controller's job (see
//! [`QueryToken`](crate::app::QueryToken)).
//!
//! # Modules
//!
//! - `messages`: Request/completion envelopes with trace context propagation
//! - `nominatim`: HTTP gateway for Nominatim-compatible geocoders
//! - `fixture`: In-memory gateway backed by a JSON file of places

pub mod fixture;
pub mod messages;
pub mod nominatim;

pub use fixture::FixtureGateway;
pub use messages::{SearchCompletion, SearchRequest, TraceContext};
pub use nominatim::NominatimGateway;

use crate::domain::{PlaceResult, SearchError};
use futures_util::future::BoxFuture;

/// Outcome of a single search.
pub type SearchOutcome = std::result::Result<Vec<PlaceResult>, SearchError>;

/// A place search provider.
///
/// `search` must not block: it returns a boxed future that does nothing until
/// polled. The future always resolves, either with results or with a
/// [`SearchError`]; provider failures never panic.
pub trait SearchGateway: Send + Sync {
    /// Starts a search for `query` (non-empty).
    fn search(&self, query: &str) -> BoxFuture<'static, SearchOutcome>;
}

impl<G: SearchGateway + ?Sized> SearchGateway for std::sync::Arc<G> {
    fn search(&self, query: &str) -> BoxFuture<'static, SearchOutcome> {
        (**self).search(query)
    }
}
