//! The inverted index over a catalog snapshot.
//!
//! The index is built once, from a point-in-time read of the catalog, and is
//! immutable afterwards: there is no mutator API, and callers that change
//! the catalog must build a fresh index to observe the change.

use crate::catalog::{Catalog, Project, StoreError};
use crate::text::{fold, tokenize};
use std::collections::HashMap;

/// The provenance of an indexed token. Each kind carries a fixed weight that
/// a matching term contributes to a record's relevance per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
  /// A word from the free-text description.
  Description,
  /// A sub-word of a multi-word tag.
  TagPart,
  /// A tag, folded but otherwise verbatim.
  Tag,
  /// A word from the display name.
  Name,
  /// The short name, folded but unsplit.
  ShortName,
}

impl FieldKind {
  /// The per-occurrence relevance contribution of this field kind.
  pub fn weight(self) -> f32 {
    match self {
      FieldKind::Description => 0.01,
      FieldKind::TagPart => 0.7,
      FieldKind::Tag => 0.8,
      FieldKind::Name => 0.9,
      FieldKind::ShortName => 0.95,
    }
  }
}

/// A single posting: which record a token came from, and from which field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
  pub short_name: String,
  pub kind: FieldKind,
}

/// An inverted index from folded token to postings, plus an exact-tag map
/// backing `tag:` atoms.
///
/// Postings keep insertion order and allow duplicates; repeated occurrences
/// of a token in one record accumulate weight at query time.
#[derive(Debug, Default)]
pub struct TextIndex {
  postings: HashMap<String, Vec<IndexEntry>>,
  tags: HashMap<String, Vec<String>>,
  list: Vec<String>,
}

impl TextIndex {
  /// Builds an index over every record in `catalog`.
  ///
  /// Construction is all-or-nothing: any store error while listing or
  /// fetching a record aborts the build, so a partially-indexed engine can
  /// never be observed.
  pub fn build(catalog: &impl Catalog) -> Result<Self, StoreError> {
    let names = catalog.list()?;
    let mut index = TextIndex {
      postings: HashMap::new(),
      tags: HashMap::new(),
      list: names.clone(),
    };
    for short_name in &names {
      let project = catalog.get_project(short_name)?;
      index.add(&project);
    }
    tracing::debug!(
      records = index.list.len(),
      tokens = index.postings.len(),
      "text index built"
    );
    Ok(index)
  }

  fn add(&mut self, project: &Project) {
    let sn = &project.short_name;
    self.insert(sn, FieldKind::ShortName, [fold(sn)]);
    self.insert(sn, FieldKind::Name, tokenize(&fold(&project.name)));
    self.insert(
      sn,
      FieldKind::Description,
      tokenize(&fold(&project.description)),
    );
    for tag in &project.tags {
      let folded = fold(tag);
      self.add_tag(sn, &folded);
      let parts = tokenize(&folded);
      self.insert(sn, FieldKind::Tag, [folded]);
      // Sub-words only count when the tag actually splits; a single-word
      // tag is already covered by its verbatim entry.
      if parts.len() > 1 {
        self.insert(sn, FieldKind::TagPart, parts);
      }
    }
  }

  fn insert(
    &mut self,
    short_name: &str,
    kind: FieldKind,
    words: impl IntoIterator<Item = String>,
  ) {
    for word in words {
      if word.is_empty() {
        continue;
      }
      self.postings.entry(word).or_default().push(IndexEntry {
        short_name: short_name.to_string(),
        kind,
      });
    }
  }

  /// Associates a folded tag with a short name in the exact-tag map,
  /// deduplicating repeated tags on the same record.
  fn add_tag(&mut self, short_name: &str, tag: &str) {
    if tag.is_empty() {
      return;
    }
    let indexed = self.tags.entry(tag.to_string()).or_default();
    if !indexed.iter().any(|sn| sn == short_name) {
      indexed.push(short_name.to_string());
    }
  }

  /// Postings for a folded token, in insertion order.
  pub fn postings(&self, token: &str) -> &[IndexEntry] {
    self.postings.get(token).map_or(&[], Vec::as_slice)
  }

  /// Short names carrying exactly the given folded tag.
  pub fn tagged(&self, tag: &str) -> &[String] {
    self.tags.get(tag).map_or(&[], Vec::as_slice)
  }

  /// Every short name in the indexed snapshot, in catalog listing order.
  pub fn short_names(&self) -> &[String] {
    &self.list
  }
}
