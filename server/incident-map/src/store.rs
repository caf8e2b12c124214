//! The record store: ordered, in-memory, first-match-wins lookup by id.

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::geocode::GeocodingResolver;
use crate::types::IncidentRecord;

/// Owns every incident record plus the resolver used to place them.
///
/// Iteration order is insertion order. Ids are not required to be unique;
/// lookups, updates and deletes act on the first record with a matching id.
/// Every mutating call either succeeds fully or leaves the store untouched.
pub struct IncidentStore<R> {
  resolver: R,
  records: Vec<IncidentRecord>,
}

impl<R: GeocodingResolver> IncidentStore<R> {
  pub fn new(resolver: R) -> Self {
    Self {
      resolver,
      records: Vec::new(),
    }
  }

  /// Resolve `address` and append a new record.
  pub fn create(&mut self, id: &str, category: &str, address: &str) -> Result<(), StoreError> {
    let Some(at) = self.resolver.resolve(address) else {
      warn!(id = %id, address = %address, "create rejected: address not resolved");
      return Err(StoreError::address_not_resolved(address));
    };

    self.records.push(IncidentRecord::new(id, category, at));
    info!(id = %id, category = %category, count = self.records.len(), "incident created");
    Ok(())
  }

  /// All records, oldest first.
  pub fn read_all(&self) -> &[IncidentRecord] {
    &self.records
  }

  /// Re-categorize and relocate the first record with `id`.
  ///
  /// The id is checked before the address is resolved, so an unknown id never
  /// reaches the resolver.
  pub fn update(&mut self, id: &str, category: &str, address: &str) -> Result<(), StoreError> {
    let idx = self
      .position(id)
      .ok_or_else(|| StoreError::record_not_found(id))?;

    let Some(at) = self.resolver.resolve(address) else {
      warn!(id = %id, address = %address, "update rejected: address not resolved");
      return Err(StoreError::address_not_resolved(address));
    };

    self.records[idx].relocate(category.to_string(), at);
    info!(id = %id, category = %category, "incident updated");
    Ok(())
  }

  /// Remove the first record with `id`. Later duplicates stay.
  pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
    let idx = self
      .position(id)
      .ok_or_else(|| StoreError::record_not_found(id))?;

    self.records.remove(idx);
    info!(id = %id, count = self.records.len(), "incident deleted");
    Ok(())
  }

  pub fn find_by_id(&self, id: &str) -> Option<&IncidentRecord> {
    self.position(id).map(|idx| &self.records[idx])
  }

  pub fn resolver(&self) -> &R {
    &self.resolver
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  fn position(&self, id: &str) -> Option<usize> {
    let found = self.records.iter().position(|r| r.id() == id);
    if found.is_none() {
      debug!(id = %id, "no incident with this id");
    }
    found
  }
}
