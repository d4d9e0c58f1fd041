//! HTTP gateway for Nominatim-compatible geocoders.
//!
//! Issues `GET {base_url}/search?q=...&format=jsonv2&addressdetails=1&limit=N`
//! and maps each hit's `address` object onto a [`Placemark`]. Nominatim's usage
//! policy requires an identifying `User-Agent`, which is always sent.

use crate::domain::{Coordinate, MapItem, PlaceResult, Placemark, SearchError};
use crate::gateway::{SearchGateway, SearchOutcome};
use crate::Config;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::Instrument;

/// Gateway backed by a Nominatim `/search` endpoint.
///
/// Cheap to clone; the HTTP client is shared.
#[derive(Debug, Clone)]
pub struct NominatimGateway {
    inner: Arc<NominatimInner>,
}

#[derive(Debug)]
struct NominatimInner {
    http_client: Client,
    search_url: String,
    limit: u32,
    country_codes: Option<String>,
}

impl NominatimGateway {
    /// Creates a gateway for the endpoint at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Network`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, SearchError> {
        let http_client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            inner: Arc::new(NominatimInner {
                http_client,
                search_url: format!("{}/search", base_url.trim_end_matches('/')),
                limit: 10,
                country_codes: None,
            }),
        })
    }

    /// Creates a gateway from the provider settings in `config`.
    ///
    /// # Errors
    ///
    /// See [`NominatimGateway::new`].
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        let gateway = Self::new(&config.provider_url, &config.user_agent)?;
        Ok(gateway
            .with_limit(config.result_limit)
            .with_country_codes(config.country_codes.clone()))
    }

    /// Sets the maximum number of results requested per search.
    #[must_use]
    pub fn with_limit(self, limit: u32) -> Self {
        self.map_inner(|inner| inner.limit = limit.max(1))
    }

    /// Restricts results to a comma-separated list of ISO 3166-1 alpha-2 codes.
    #[must_use]
    pub fn with_country_codes(self, country_codes: Option<String>) -> Self {
        self.map_inner(|inner| {
            inner.country_codes = country_codes.filter(|codes| !codes.trim().is_empty());
        })
    }

    /// The full search URL requests are sent to.
    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.inner.search_url
    }

    fn map_inner(self, update: impl FnOnce(&mut NominatimInner)) -> Self {
        let mut inner = Arc::try_unwrap(self.inner).unwrap_or_else(|shared| NominatimInner {
            http_client: shared.http_client.clone(),
            search_url: shared.search_url.clone(),
            limit: shared.limit,
            country_codes: shared.country_codes.clone(),
        });
        update(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl SearchGateway for NominatimGateway {
    fn search(&self, query: &str) -> BoxFuture<'static, SearchOutcome> {
        let inner = Arc::clone(&self.inner);
        let query = query.to_string();
        let span = tracing::debug_span!("nominatim_search", query = %query);

        async move {
            let mut params: Vec<(&str, String)> = vec![
                ("q", query.clone()),
                ("format", "jsonv2".to_string()),
                ("addressdetails", "1".to_string()),
                ("limit", inner.limit.to_string()),
            ];
            if let Some(codes) = &inner.country_codes {
                params.push(("countrycodes", codes.clone()));
            }

            let response = inner
                .http_client
                .get(&inner.search_url)
                .query(&params)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                tracing::debug!(status = status.as_u16(), "nominatim returned an error status");
                return Err(SearchError::Http {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let results = parse_search_response(&body)?;
            tracing::debug!(query = %query, result_count = results.len(), "nominatim search finished");
            Ok(results)
        }
        .instrument(span)
        .boxed()
    }
}

/// One hit in a `format=jsonv2` response.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    osm_type: Option<String>,
    #[serde(default)]
    osm_id: Option<u64>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NominatimAddress {
    house_number: Option<String>,
    road: Option<String>,
    pedestrian: Option<String>,
    footway: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    quarter: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    state: Option<String>,
    province: Option<String>,
    region: Option<String>,
}

impl NominatimAddress {
    fn into_placemark(self) -> Placemark {
        Placemark {
            sub_thoroughfare: self.house_number,
            thoroughfare: self.road.or(self.pedestrian).or(self.footway),
            sub_locality: self.suburb.or(self.neighbourhood).or(self.quarter),
            locality: self.city.or(self.town).or(self.village).or(self.hamlet),
            administrative_area: self.state.or(self.province).or(self.region),
        }
    }
}

impl NominatimPlace {
    fn into_map_item(self) -> MapItem {
        let coordinate = match (self.lat.as_deref(), self.lon.as_deref()) {
            (Some(lat), Some(lon)) => lat
                .parse::<f64>()
                .ok()
                .zip(lon.parse::<f64>().ok())
                .map(|(latitude, longitude)| Coordinate {
                    latitude,
                    longitude,
                }),
            _ => None,
        };

        let provider_id = match (self.osm_type, self.osm_id) {
            (Some(kind), Some(id)) => Some(format!("{kind}/{id}")),
            _ => None,
        };

        MapItem {
            name: self.name.filter(|n| !n.is_empty()).or(self.display_name),
            placemark: self.address.into_placemark(),
            coordinate,
            provider_id,
        }
    }
}

/// Decodes a `format=jsonv2` search body, preserving the provider's ordering.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] when the body is not a JSON array of places.
pub fn parse_search_response(body: &str) -> Result<Vec<PlaceResult>, SearchError> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(places
        .into_iter()
        .map(|place| PlaceResult::new(place.into_map_item()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns its base URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0_u8; 4096];
            let _ = stream.read(&mut request);
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    const SPRINGFIELD: &str = r#"[
        {
            "place_id": 1234,
            "osm_type": "way",
            "osm_id": 987654,
            "lat": "39.7990",
            "lon": "-89.6440",
            "name": "",
            "display_name": "123, Main St, Springfield, Illinois, USA",
            "address": {
                "house_number": "123",
                "road": "Main St",
                "city": "Springfield",
                "state": "IL",
                "country": "United States"
            }
        },
        {
            "osm_type": "node",
            "osm_id": 5,
            "display_name": "Old Town, Shelbyville",
            "address": { "quarter": "Old Town", "town": "Shelbyville" }
        }
    ]"#;

    #[test]
    fn maps_address_details_onto_placemarks() {
        let results = parse_search_response(SPRINGFIELD).unwrap();
        assert_eq!(results.len(), 2);

        let first = results[0].placemark();
        assert_eq!(first.sub_thoroughfare.as_deref(), Some("123"));
        assert_eq!(first.thoroughfare.as_deref(), Some("Main St"));
        assert_eq!(first.locality.as_deref(), Some("Springfield"));
        assert_eq!(first.administrative_area.as_deref(), Some("IL"));

        let second = results[1].placemark();
        assert_eq!(second.sub_locality.as_deref(), Some("Old Town"));
        assert_eq!(second.locality.as_deref(), Some("Shelbyville"));
        assert!(second.thoroughfare.is_none());
    }

    #[test]
    fn keeps_provider_identity_on_the_handle() {
        let results = parse_search_response(SPRINGFIELD).unwrap();
        let handle = results[0].handle();

        assert_eq!(handle.provider_id.as_deref(), Some("way/987654"));
        assert_eq!(
            handle.name.as_deref(),
            Some("123, Main St, Springfield, Illinois, USA")
        );
        let coordinate = handle.coordinate.unwrap();
        assert!((coordinate.latitude - 39.799).abs() < 1e-9);
        assert!((coordinate.longitude + 89.644).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_array_bodies() {
        let error = parse_search_response(r#"{"error":"Unable to geocode"}"#).unwrap_err();
        assert!(matches!(error, SearchError::Parse(_)));
    }

    #[test]
    fn empty_array_is_an_empty_result() {
        assert!(parse_search_response("[]").unwrap().is_empty());
    }

    #[test]
    fn builds_search_url_and_ignores_blank_country_codes() {
        let gateway = NominatimGateway::new("https://geo.example.org/", "mapcomplete-tests")
            .unwrap()
            .with_country_codes(Some("  ".to_string()));

        assert_eq!(gateway.search_url(), "https://geo.example.org/search");
        assert!(gateway.inner.country_codes.is_none());
    }

    #[tokio::test]
    async fn error_status_becomes_http_error() {
        let base_url = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\ncontent-length: 17\r\nconnection: close\r\n\r\nToo Many Requests",
        );
        let gateway = NominatimGateway::new(&base_url, "mapcomplete-tests").unwrap();

        match gateway.search("123 Main").await {
            Err(SearchError::Http { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Too Many Requests");
            }
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_status_is_parsed() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n[]",
        );
        let gateway = NominatimGateway::new(&base_url, "mapcomplete-tests").unwrap();

        assert!(gateway.search("123 Main").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn refused_connection_becomes_network_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let gateway = NominatimGateway::new(&format!("http://{addr}"), "mapcomplete-tests").unwrap();

        let error = gateway.search("123 Main").await.unwrap_err();
        assert!(matches!(error, SearchError::Network(_)), "{error:?}");
    }
}
