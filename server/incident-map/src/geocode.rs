//! Address-to-coordinate resolution.
//!
//! The store only sees [`GeocodingResolver`]: an address either resolves to a
//! [`Coordinate`] or it doesn't. Concrete resolvers keep a typed
//! [`GeocodeError`] internally, log it, and report "not found".

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ConfigError, GeocodeError};
use crate::types::Coordinate;

/// Capability the store needs from a geocoder.
pub trait GeocodingResolver {
  /// Resolve `address`. Provider failures and genuine misses both yield `None`.
  fn resolve(&self, address: &str) -> Option<Coordinate>;
}

impl<R: GeocodingResolver + ?Sized> GeocodingResolver for &R {
  fn resolve(&self, address: &str) -> Option<Coordinate> {
    (**self).resolve(address)
  }
}

impl<R: GeocodingResolver + ?Sized> GeocodingResolver for Box<R> {
  fn resolve(&self, address: &str) -> Option<Coordinate> {
    (**self).resolve(address)
  }
}

// ---------------------------------------------------------------------------
// Nominatim (OpenStreetMap) over blocking HTTP
// ---------------------------------------------------------------------------

/// One element of a Nominatim `/search?format=json` response. Other fields ignored.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
  lat: String,
  lon: String,
}

/// Parse a Nominatim search body. `Ok(None)` means the service matched nothing.
pub fn parse_search_response(body: &str) -> Result<Option<Coordinate>, GeocodeError> {
  first_coordinate(serde_json::from_str(body)?)
}

fn first_coordinate(places: Vec<NominatimPlace>) -> Result<Option<Coordinate>, GeocodeError> {
  let Some(place) = places.into_iter().next() else {
    return Ok(None);
  };

  let latitude = parse_degrees("lat", &place.lat)?;
  let longitude = parse_degrees("lon", &place.lon)?;
  Ok(Some(Coordinate::new(latitude, longitude)))
}

fn parse_degrees(field: &'static str, raw: &str) -> Result<f64, GeocodeError> {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite())
    .ok_or_else(|| GeocodeError::Coordinate {
      field,
      value: raw.to_string(),
    })
}

/// Resolver backed by a Nominatim instance.
pub struct NominatimResolver {
  search_url: String,
  http_client: reqwest::blocking::Client,
}

impl NominatimResolver {
  pub fn new(config: &Config) -> Result<Self, ConfigError> {
    let http_client = reqwest::blocking::Client::builder()
      .timeout(config.request_timeout())
      .user_agent(config.user_agent.clone())
      .build()?;

    Ok(Self {
      search_url: format!("{}/search", config.nominatim_url.trim_end_matches('/')),
      http_client,
    })
  }

  pub fn search_url(&self) -> &str {
    &self.search_url
  }

  fn lookup(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
    let places: Vec<NominatimPlace> = self
      .http_client
      .get(&self.search_url)
      .query(&[("q", address), ("format", "json"), ("limit", "1")])
      .send()?
      .error_for_status()?
      .json()?;
    first_coordinate(places)
  }
}

impl GeocodingResolver for NominatimResolver {
  fn resolve(&self, address: &str) -> Option<Coordinate> {
    match self.lookup(address) {
      Ok(Some(at)) => {
        debug!(address = %address, lat = at.latitude, lon = at.longitude, "address resolved");
        Some(at)
      }
      Ok(None) => {
        debug!(address = %address, "no geocoding match");
        None
      }
      Err(e) => {
        warn!(address = %address, error = %e, "geocoding failed; treating as not found");
        None
      }
    }
  }
}

// ---------------------------------------------------------------------------
// In-memory address table
// ---------------------------------------------------------------------------

/// Exact-match address table. Used for offline sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
  entries: HashMap<String, Coordinate>,
}

impl TableResolver {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insert.
  pub fn with(mut self, address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
    self.insert(address, Coordinate::new(latitude, longitude));
    self
  }

  pub fn insert(&mut self, address: impl Into<String>, at: Coordinate) {
    self.entries.insert(address.into(), at);
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Load `{"<address>": {"latitude": .., "longitude": ..}, ...}` from disk.
  pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
    let shown = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::GazetteerIo {
      path: shown.clone(),
      source,
    })?;
    let entries: HashMap<String, Coordinate> =
      serde_json::from_str(&raw).map_err(|source| ConfigError::GazetteerJson { path: shown, source })?;
    Ok(Self { entries })
  }
}

impl GeocodingResolver for TableResolver {
  fn resolve(&self, address: &str) -> Option<Coordinate> {
    let hit = self.entries.get(address).copied();
    if hit.is_none() {
      debug!(address = %address, "address not in gazetteer");
    }
    hit
  }
}
