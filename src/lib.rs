//! MapComplete: the core of a location-autocomplete text field.
//!
//! As the user types into a single-line field, MapComplete queries a place
//! search provider and shows a dropdown of matching places below the field.
//! Picking a row fills the field with the place's street line.
//!
//! - Searches start once the text is longer than a configurable threshold
//! - Only the most recently issued search may update the dropdown
//! - The dropdown grows one row at a time, then clamps at a maximum height
//! - Consumers hear about selections and provider errors through an optional delegate

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (main.rs terminal demo, or a GUI toolkit)     │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action execution                                 │
//! │  - Query tokens                                     │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌────────────────────────┐   ┌────────────────────────┐
//! │ UI Layer (ui/)         │   │ Gateway Layer          │
//! │ - Dropdown ownership   │   │ (gateway/)             │
//! │ - Widget interfaces    │   │ - Nominatim over HTTP  │
//! │ - Terminal rendering   │   │ - JSON fixtures        │
//! └────────────────────────┘   └────────────────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Places and formatting (domain/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a rotating JSON file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! [`Config`] can be read from a TOML file:
//!
//! ```toml
//! minimum_input_length_for_search = 5
//! row_height = 40.0
//! max_visible_height = 100.0
//! provider_url = "https://nominatim.openstreetmap.org"
//! country_codes = "us,ca"
//! theme_name = "catppuccin-latte"
//! trace_level = "debug"
//! ```
//!
//! or from `key=value` pairs (see [`Config::from_map`]).
//!
//! # Example
//!
//! ```rust
//! use mapcomplete::{handle_event, AutocompleteState, Config, Event};
//!
//! let config = Config::default();
//! let mut state = AutocompleteState::from_config(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::TextChanged("12345".into()))?;
//! assert!(actions.is_empty());
//! # Ok::<(), mapcomplete::MapCompleteError>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod ui;

pub mod observability;

pub use app::{
    handle_event, Action, AutocompleteController, AutocompleteDelegate, AutocompleteState, Event,
    QueryToken, SearchState,
};
pub use domain::{
    format_locality_line, format_street_line, MapCompleteError, MapItem, PlaceHandle,
    PlaceResult, Placemark, Result, SearchError,
};
pub use gateway::{FixtureGateway, NominatimGateway, SearchGateway};
pub use ui::Theme;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Public Nominatim instance.
pub const DEFAULT_PROVIDER_URL: &str = "https://nominatim.openstreetmap.org";

/// Widget and provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Searches start once the text is longer than this. Default: 5
    pub minimum_input_length_for_search: usize,

    /// Height of one dropdown row. Default: 40
    pub row_height: f32,

    /// Dropdown height once `cap_rows` results are shown. Default: 100
    pub max_visible_height: f32,

    /// Result count at which the dropdown stops growing. Default: 5
    pub cap_rows: usize,

    /// Base URL of a Nominatim-compatible geocoder.
    pub provider_url: String,

    /// Maximum results requested per search. Default: 10
    pub result_limit: u32,

    /// Comma-separated ISO 3166-1 alpha-2 codes restricting results.
    pub country_codes: Option<String>,

    /// `User-Agent` sent to the provider. Nominatim's usage policy requires one.
    pub user_agent: String,

    /// JSON file of places; when set, searches run offline against it.
    pub fixture_file: Option<String>,

    /// Built-in theme: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Trace level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minimum_input_length_for_search: 5,
            row_height: 40.0,
            max_visible_height: 100.0,
            cap_rows: 5,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            result_limit: 10,
            country_codes: None,
            user_agent: format!("mapcomplete/{}", env!("CARGO_PKG_VERSION")),
            fixture_file: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// Keys are the field names (`theme` is accepted for `theme_name`).
    /// Unparseable numbers and empty values keep their defaults; unknown keys
    /// are ignored.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use mapcomplete::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("minimum_input_length_for_search".to_string(), "3".to_string());
    /// map.insert("row_height".to_string(), "oops".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.minimum_input_length_for_search, 3);
    /// assert_eq!(config.row_height, 40.0);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies string key/value overrides on top of `self`, with the same
    /// rules as [`Config::from_map`].
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        fn parsed<T: std::str::FromStr>(value: Option<&str>, current: T) -> T {
            value.and_then(|v| v.parse().ok()).unwrap_or(current)
        }

        self.minimum_input_length_for_search = parsed(
            get("minimum_input_length_for_search"),
            self.minimum_input_length_for_search,
        );
        self.row_height = parsed(get("row_height"), self.row_height);
        self.max_visible_height = parsed(get("max_visible_height"), self.max_visible_height);
        self.cap_rows = parsed(get("cap_rows"), self.cap_rows);
        self.result_limit = parsed(get("result_limit"), self.result_limit);

        if let Some(url) = get("provider_url") {
            self.provider_url = url.to_string();
        }
        if let Some(agent) = get("user_agent") {
            self.user_agent = agent.to_string();
        }

        let optional = |key: &str, current: Option<String>| get(key).map(String::from).or(current);
        self.country_codes = optional("country_codes", self.country_codes);
        self.fixture_file = optional("fixture_file", self.fixture_file);
        self.theme_name = optional("theme_name", optional("theme", self.theme_name));
        self.theme_file = optional("theme_file", self.theme_file);
        self.trace_level = optional("trace_level", self.trace_level);

        self
    }

    /// Reads a TOML configuration file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MapCompleteError::Io`] if the file cannot be read and
    /// [`MapCompleteError::Config`] if it is not valid TOML for this struct.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| MapCompleteError::Config(format!("Failed to parse config TOML: {e}")))
    }

    /// Resolves the dropdown theme: file first, then name, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        let file = self
            .theme_file
            .as_deref()
            .map(infrastructure::expand_tilde);
        Theme::resolve(file.as_deref(), self.theme_name.as_deref())
    }
}

/// Creates the gateway a configuration asks for: a [`FixtureGateway`] when
/// `fixture_file` is set, otherwise a [`NominatimGateway`].
///
/// # Errors
///
/// Returns an error if the fixture file cannot be loaded or the HTTP client
/// cannot be built.
pub fn build_gateway(config: &Config) -> Result<Arc<dyn SearchGateway>> {
    if let Some(path) = &config.fixture_file {
        let path = infrastructure::expand_tilde(path);
        let gateway = FixtureGateway::from_file(&path)?;
        tracing::debug!(fixture_file = %path, places = gateway.len(), "using fixture gateway");
        return Ok(Arc::new(gateway));
    }

    let gateway = NominatimGateway::from_config(config)?;
    tracing::debug!(search_url = %gateway.search_url(), "using nominatim gateway");
    Ok(Arc::new(gateway))
}
