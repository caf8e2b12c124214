//! Structured error types.

use thiserror::Error;

/// Failures of a store operation. The store is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  #[error("address not found: {address}")]
  AddressNotResolved { address: String },

  #[error("incident id does not exist: {id}")]
  RecordNotFound { id: String },
}

impl StoreError {
  pub fn address_not_resolved(address: &str) -> Self {
    Self::AddressNotResolved {
      address: address.to_string(),
    }
  }

  pub fn record_not_found(id: &str) -> Self {
    Self::RecordNotFound { id: id.to_string() }
  }
}

/// Why a concrete resolver came back empty. Logged, then collapsed to "not found".
#[derive(Debug, Error)]
pub enum GeocodeError {
  #[error("http: {0}")]
  Http(#[from] reqwest::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("bad coordinate: {field}={value}")]
  Coordinate { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid config: {field}: {reason}")]
  Invalid { field: String, reason: String },

  #[error("gazetteer {path}: {source}")]
  GazetteerIo {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("gazetteer {path}: {source}")]
  GazetteerJson {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("http client: {0}")]
  Client(#[from] reqwest::Error),
}

impl ConfigError {
  pub fn invalid(field: &str, reason: &str) -> Self {
    Self::Invalid {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
