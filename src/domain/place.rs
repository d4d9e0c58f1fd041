//! Place records returned by a search.
//!
//! A search provider answers a free-text query with a list of [`MapItem`]s.
//! Each one carries an address breakdown ([`Placemark`]) plus whatever the
//! provider knows about the place. The widget wraps each item in a
//! [`PlaceResult`], which renders from the placemark and hands the untouched
//! item back to the consumer through a [`PlaceHandle`] when a row is picked.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Address breakdown of a place.
///
/// Every field is optional; providers routinely omit some of them (a city has
/// no street, a street segment has no house number).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placemark {
    /// Street number, e.g. `"123"`.
    pub sub_thoroughfare: Option<String>,
    /// Street name, e.g. `"Main St"`.
    pub thoroughfare: Option<String>,
    /// Neighbourhood or district, e.g. `"Downtown"`.
    pub sub_locality: Option<String>,
    /// City, e.g. `"Springfield"`.
    pub locality: Option<String>,
    /// State or province, e.g. `"IL"`.
    pub administrative_area: Option<String>,
}

/// Geographic coordinate in decimal degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place item as returned by a search provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapItem {
    /// Provider display name for the place, if any.
    #[serde(default)]
    pub name: Option<String>,

    /// Address breakdown used for display.
    #[serde(default)]
    pub placemark: Placemark,

    /// Location of the place, if the provider reported one.
    #[serde(default)]
    pub coordinate: Option<Coordinate>,

    /// Provider-specific identifier (e.g. an OSM id), if any.
    #[serde(default)]
    pub provider_id: Option<String>,
}

/// Shared, immutable handle to the original place item.
///
/// This is what the selection callback receives. Cloning is cheap.
pub type PlaceHandle = Arc<MapItem>;

/// One entry of a search result list.
///
/// Immutable once built. Display lines are derived from
/// [`placemark`](Self::placemark); [`handle`](Self::handle) exposes the original
/// item for the selection callback.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceResult {
    item: PlaceHandle,
}

impl PlaceResult {
    /// Wraps a provider item.
    #[must_use]
    pub fn new(item: MapItem) -> Self {
        Self {
            item: Arc::new(item),
        }
    }

    /// Builds a result from a bare placemark, with no other provider data.
    #[must_use]
    pub fn from_placemark(placemark: Placemark) -> Self {
        Self::new(MapItem {
            placemark,
            ..MapItem::default()
        })
    }

    /// Address breakdown of this result.
    #[must_use]
    pub fn placemark(&self) -> &Placemark {
        &self.item.placemark
    }

    /// Handle to the original item.
    #[must_use]
    pub fn handle(&self) -> PlaceHandle {
        Arc::clone(&self.item)
    }
}

impl From<MapItem> for PlaceResult {
    fn from(item: MapItem) -> Self {
        Self::new(item)
    }
}
