//! Domain layer for the map autocomplete field.
//!
//! This module contains the place model, the display formatting rules, and the
//! error taxonomy. Nothing in here knows about the text field, the dropdown, or
//! the search provider's wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`place`]: Place records returned by a search
//! - [`format`]: Street and locality display lines
//!
//! # Examples
//!
//! ```
//! use mapcomplete::domain::{format_street_line, Placemark};
//!
//! let placemark = Placemark {
//!     sub_thoroughfare: Some("221B".to_string()),
//!     thoroughfare: Some("Baker Street".to_string()),
//!     ..Default::default()
//! };
//! assert_eq!(format_street_line(&placemark), "221B Baker Street");
//! ```

pub mod error;
pub mod format;
pub mod place;

pub use error::{MapCompleteError, Result, SearchError};
pub use format::{format_locality_line, format_street_line};
pub use place::{Coordinate, MapItem, PlaceHandle, PlaceResult, Placemark};
