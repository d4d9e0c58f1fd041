//! In-memory gateway backed by a fixed list of places.
//!
//! Used for offline runs of the demo binary and for tests. Places are loaded
//! from a JSON array of [`MapItem`]s and matched with the Skim fuzzy algorithm:
//! every whitespace-separated query token must match the place's name, street
//! line, or locality line. Hits are ordered by total score, best first; ties
//! keep file order.

use crate::domain::{
    format_locality_line, format_street_line, MapCompleteError, MapItem, PlaceResult, Result,
    SearchError,
};
use crate::gateway::{SearchGateway, SearchOutcome};
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::path::Path;
use std::sync::Arc;

/// Gateway answering from a fixed list of places.
#[derive(Debug, Clone, Default)]
pub struct FixtureGateway {
    places: Arc<Vec<MapItem>>,
    failure: Option<String>,
}

impl FixtureGateway {
    /// Creates a gateway over `places`.
    #[must_use]
    pub fn new(places: Vec<MapItem>) -> Self {
        Self {
            places: Arc::new(places),
            failure: None,
        }
    }

    /// Loads places from a JSON file containing an array of [`MapItem`]s.
    ///
    /// # Errors
    ///
    /// Returns [`MapCompleteError::Io`] if the file cannot be read and
    /// [`MapCompleteError::Search`] if it is not a valid place list.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let places: Vec<MapItem> = serde_json::from_str(&contents).map_err(|e| {
            MapCompleteError::Search(SearchError::Parse(format!(
                "{}: {e}",
                path.display()
            )))
        })?;

        tracing::debug!(path = %path.display(), place_count = places.len(), "fixture places loaded");
        Ok(Self::new(places))
    }

    /// Makes every search fail with [`SearchError::Provider`] and `message`.
    #[must_use]
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of places known to the gateway.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the gateway has no places at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Runs the fuzzy match synchronously.
    #[must_use]
    pub fn matches(&self, query: &str) -> Vec<PlaceResult> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return vec![];
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize)> = self
            .places
            .iter()
            .enumerate()
            .filter_map(|(index, place)| {
                let haystack = Self::haystack(place);
                tokens
                    .iter()
                    .map(|token| matcher.fuzzy_match(&haystack, token))
                    .sum::<Option<i64>>()
                    .map(|score| (score, index))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        scored
            .into_iter()
            .map(|(_, index)| PlaceResult::new(self.places[index].clone()))
            .collect()
    }

    fn haystack(place: &MapItem) -> String {
        let mut haystack = place.name.clone().unwrap_or_default();
        haystack.push(' ');
        haystack.push_str(&format_street_line(&place.placemark));
        haystack.push_str(&format_locality_line(&place.placemark));
        haystack.to_lowercase()
    }
}

impl SearchGateway for FixtureGateway {
    fn search(&self, query: &str) -> BoxFuture<'static, SearchOutcome> {
        let outcome = match &self.failure {
            Some(message) => Err(SearchError::Provider(message.clone())),
            None => Ok(self.matches(query)),
        };
        tracing::trace!(query = %query, ok = outcome.is_ok(), "fixture search");
        future::ready(outcome).boxed()
    }
}
