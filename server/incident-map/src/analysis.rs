//! Category frequency aggregation.

use serde::Serialize;

use crate::types::{CategoryCount, IncidentRecord};

/// Per-category counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts {
  rows: Vec<CategoryCount>,
}

impl CategoryCounts {
  pub fn get(&self, category: &str) -> Option<usize> {
    self.rows.iter().find(|r| r.category == category).map(|r| r.count)
  }

  pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
    self.rows.iter()
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  fn bump(&mut self, category: &str) {
    match self.rows.iter_mut().find(|r| r.category == category) {
      Some(row) => row.count += 1,
      None => self.rows.push(CategoryCount {
        category: category.to_string(),
        count: 1,
      }),
    }
  }
}

/// Count records per category. Empty input gives empty counts.
pub fn count_by_category(records: &[IncidentRecord]) -> CategoryCounts {
  let mut counts = CategoryCounts::default();
  for record in records {
    counts.bump(record.category());
  }
  counts
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Coordinate;

  fn rec(category: &str) -> IncidentRecord {
    IncidentRecord::new("x", category, Coordinate::new(0.0, 0.0))
  }

  #[test]
  fn counts_per_category() {
    let counts = count_by_category(&[rec("theft"), rec("theft"), rec("assault")]);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get("theft"), Some(2));
    assert_eq!(counts.get("assault"), Some(1));
    assert_eq!(counts.get("arson"), None);
  }

  #[test]
  fn keeps_first_seen_order() {
    let counts = count_by_category(&[rec("b"), rec("a"), rec("b"), rec("c")]);
    let order: Vec<_> = counts.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(order, vec!["b", "a", "c"]);
  }

  #[test]
  fn empty_input_gives_empty_counts() {
    assert!(count_by_category(&[]).is_empty());
  }

  #[test]
  fn categories_are_case_sensitive() {
    let counts = count_by_category(&[rec("Theft"), rec("theft")]);
    assert_eq!(counts.len(), 2);
  }

  #[test]
  fn serializes_as_array() {
    let counts = count_by_category(&[rec("theft")]);
    assert_eq!(
      serde_json::to_string(&counts).unwrap(),
      r#"[{"category":"theft","count":1}]"#
    );
  }
}
