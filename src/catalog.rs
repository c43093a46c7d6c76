//! The catalog of projects that the search engine indexes.
//!
//! The engine only ever reads from a [`Catalog`], and only at index-build
//! time. Persistence, locking, and versioning of the catalog are the
//! caller's concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single catalog record.
///
/// The short name is the primary key. The remaining fields feed the
/// full-text index at different weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
  /// Unique human-readable identifier for the project.
  pub short_name: String,
  /// Display name.
  pub name: String,
  /// Free-text description.
  pub description: String,
  /// Unordered set of tag strings.
  #[serde(default)]
  pub tags: Vec<String>,
}

/// Errors raised by a catalog backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// No project with the given short name exists.
  #[error("project {short_name:?} not found")]
  NotFound { short_name: String },
  /// The backing store failed while performing an operation.
  #[error("catalog {operation} failed: {message}")]
  Backend {
    operation: &'static str,
    message: String,
  },
}

/// Read access to a catalog of projects.
///
/// Implementations must enumerate every record they hold; the search engine
/// relies on [`Catalog::list`] being a complete, point-in-time snapshot when
/// it builds its index.
pub trait Catalog {
  /// Lists the short names of every project in the catalog.
  fn list(&self) -> Result<Vec<String>, StoreError>;

  /// Fetches a single project by short name.
  fn get_project(&self, short_name: &str) -> Result<Project, StoreError>;
}

/// An in-memory catalog backed by a `BTreeMap`.
///
/// Listing order is the short-name order, which keeps index builds and
/// `NOT` evaluation deterministic.
#[derive(Debug, Default)]
pub struct InMemCatalog {
  projects: BTreeMap<String, Project>,
}

impl InMemCatalog {
  /// Creates a new, empty catalog.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds or replaces a project, keyed by its short name.
  pub fn insert(&mut self, project: Project) {
    self.projects.insert(project.short_name.clone(), project);
  }

  /// Returns the number of projects in the catalog.
  pub fn len(&self) -> usize {
    self.projects.len()
  }

  /// Returns `true` when the catalog holds no projects.
  pub fn is_empty(&self) -> bool {
    self.projects.is_empty()
  }
}

impl FromIterator<Project> for InMemCatalog {
  fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
    let mut catalog = Self::new();
    for project in iter {
      catalog.insert(project);
    }
    catalog
  }
}

impl Catalog for InMemCatalog {
  fn list(&self) -> Result<Vec<String>, StoreError> {
    Ok(self.projects.keys().cloned().collect())
  }

  fn get_project(&self, short_name: &str) -> Result<Project, StoreError> {
    self
      .projects
      .get(short_name)
      .cloned()
      .ok_or_else(|| StoreError::NotFound {
        short_name: short_name.to_string(),
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_in_mem_catalog_roundtrip() {
    let mut catalog = InMemCatalog::new();
    catalog.insert(Project {
      short_name: "go".to_string(),
      name: "Go".to_string(),
      description: "The Go programming language".to_string(),
      tags: vec!["language".to_string()],
    });

    assert_eq!(catalog.list().unwrap(), vec!["go"]);
    assert_eq!(catalog.get_project("go").unwrap().name, "Go");
  }

  #[test]
  fn test_in_mem_catalog_not_found() {
    let catalog = InMemCatalog::new();
    let err = catalog.get_project("missing").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
  }

  #[test]
  fn test_list_is_sorted() {
    let catalog: InMemCatalog = ["zebra", "apple", "mango"]
      .iter()
      .map(|sn| Project {
        short_name: sn.to_string(),
        ..Project::default()
      })
      .collect();
    assert_eq!(catalog.list().unwrap(), vec!["apple", "mango", "zebra"]);
  }
}
