//! Projection of records onto plot points (x = longitude, y = latitude).

use crate::types::{IncidentRecord, MapPoint};

pub fn project(records: &[IncidentRecord]) -> Vec<MapPoint> {
  records
    .iter()
    .map(|r| MapPoint {
      longitude: r.longitude(),
      latitude: r.latitude(),
    })
    .collect()
}
