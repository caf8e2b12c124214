//! Core data types: records, coordinates, and the JSON shapes we emit.

use serde::{Deserialize, Serialize};

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
  pub latitude: f64,
  pub longitude: f64,
}

impl Coordinate {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self { latitude, longitude }
  }
}

/// One incident entry.
///
/// Coordinates are always present: a record only exists once its address
/// has been resolved. The id is fixed at construction; category and
/// coordinates change only through [`crate::IncidentStore::update`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentRecord {
  id: String,
  category: String,
  latitude: f64,
  longitude: f64,
}

impl IncidentRecord {
  pub fn new(id: impl Into<String>, category: impl Into<String>, at: Coordinate) -> Self {
    Self {
      id: id.into(),
      category: category.into(),
      latitude: at.latitude,
      longitude: at.longitude,
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn category(&self) -> &str {
    &self.category
  }

  pub fn latitude(&self) -> f64 {
    self.latitude
  }

  pub fn longitude(&self) -> f64 {
    self.longitude
  }

  pub fn coordinate(&self) -> Coordinate {
    Coordinate::new(self.latitude, self.longitude)
  }

  /// Overwrite category and position together. Id is left alone.
  pub(crate) fn relocate(&mut self, category: String, at: Coordinate) {
    self.category = category;
    self.latitude = at.latitude;
    self.longitude = at.longitude;
  }
}

/// A point handed to the plotting side: x = longitude, y = latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
  pub longitude: f64,
  pub latitude: f64,
}

/// One row of the category frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
  pub category: String,
  pub count: usize,
}
