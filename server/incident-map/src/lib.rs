//! Incident Map — in-memory incident records tied to geocoded locations.
//!
//! Records are created from a free-text address resolved through a
//! [`GeocodingResolver`], kept in insertion order by [`IncidentStore`], and
//! aggregated per category by [`analysis::count_by_category`].
//!
//! No DB; all state lives for one session.

pub mod analysis;
pub mod config;
pub mod error;
pub mod geocode;
pub mod logging;
pub mod mapping;
pub mod menu;
pub mod store;
pub mod types;

pub use analysis::{count_by_category, CategoryCounts};
pub use config::Config;
pub use error::{ConfigError, GeocodeError, StoreError};
pub use geocode::{GeocodingResolver, NominatimResolver, TableResolver};
pub use store::IncidentStore;
pub use types::{Coordinate, IncidentRecord};
