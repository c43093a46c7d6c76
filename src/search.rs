//! Full-text search over a single catalog: the `Searcher` trait, the
//! `TextSearch` backend, and the AST evaluator.

use crate::catalog::{Catalog, StoreError};
use crate::error::SearchError;
use crate::index::TextIndex;
use crate::query::{parse, QueryAst};
use crate::text::{fold, strip_separators};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
  /// Short name of the matched record.
  pub short_name: String,
  /// Accumulated relevance. Not a probability: it has no fixed upper bound
  /// and is only meaningful for ordering.
  pub relevance: f32,
}

/// A search backend.
///
/// The `Send + Sync` bounds allow backends to be fanned out to concurrently
/// by [`AggregateSearch`](crate::engine::AggregateSearch).
pub trait Searcher: Send + Sync {
  /// Runs a query and returns matching records, best first.
  fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// Working state of one evaluation: short name to accumulated relevance.
type ResultMap = HashMap<String, f32>;

/// A full-text [`Searcher`] over the short name, name, tags, and description
/// of every project in a catalog.
///
/// `TextSearch` holds its own in-memory [`TextIndex`] built from a snapshot
/// of the catalog at construction time. Build a new instance to observe
/// catalog changes.
///
/// # Examples
///
/// ```rust
/// use greenwood::prelude::*;
///
/// let mut catalog = InMemCatalog::new();
/// catalog.insert(Project {
///     short_name: "go".to_string(),
///     name: "Go".to_string(),
///     description: "A compiled language".to_string(),
///     tags: vec!["language".to_string()],
/// });
///
/// let search = TextSearch::new(&catalog).unwrap();
/// let hits = search.search("tag:language").unwrap();
/// assert_eq!(hits[0].short_name, "go");
/// ```
pub struct TextSearch {
  index: TextIndex,
}

impl TextSearch {
  /// Builds a text search over every record in `catalog`.
  ///
  /// Fails if the catalog cannot be fully enumerated; there is no
  /// partially-indexed state.
  pub fn new(catalog: &impl Catalog) -> Result<Self, StoreError> {
    Ok(Self {
      index: TextIndex::build(catalog)?,
    })
  }
}

impl Searcher for TextSearch {
  fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
    let Some(ast) = parse(query)? else {
      return Ok(Vec::new());
    };
    let mut results = ResultMap::new();
    self.eval(&ast, &mut results);

    let mut hits: Vec<SearchHit> = results
      .into_iter()
      .map(|(short_name, relevance)| SearchHit {
        short_name,
        relevance,
      })
      .collect();
    sort_hits(&mut hits);
    Ok(hits)
  }
}

impl TextSearch {
  /// Evaluates `ast` and accumulates matches into `results`.
  fn eval(&self, ast: &QueryAst, results: &mut ResultMap) {
    match ast {
      QueryAst::And(children) => self.eval_and(children, results),
      QueryAst::Or(children) => self.eval_or(children, results),
      QueryAst::Not(child) => self.eval_not(child, results),
      QueryAst::Term(text) => self.eval_term(text, results),
      QueryAst::TagTerm(text) => self.eval_tag(text, results),
    }
  }

  /// AND is a strict intersection: start from the first child's result set
  /// and narrow it, short-circuiting as soon as it is empty. Each surviving
  /// record's relevance is the mean of its per-child relevances.
  fn eval_and(&self, children: &[QueryAst], results: &mut ResultMap) {
    let Some((first, rest)) = children.split_first() else {
      return;
    };

    self.eval(first, results);
    if results.is_empty() {
      return;
    }
    let n = children.len() as f32;
    for relevance in results.values_mut() {
      *relevance /= n;
    }

    let mut scratch = ResultMap::new();
    for child in rest {
      self.eval(child, &mut scratch);
      results.retain(|short_name, relevance| match scratch.get(short_name) {
        Some(child_relevance) => {
          *relevance += child_relevance / n;
          true
        }
        None => false,
      });
      if results.is_empty() {
        return;
      }
      scratch.clear();
    }
  }

  /// OR is a union: every record seen in any child keeps the sum of its
  /// child relevances.
  fn eval_or(&self, children: &[QueryAst], results: &mut ResultMap) {
    let mut scratch = ResultMap::new();
    for child in children {
      self.eval(child, &mut scratch);
      for (short_name, relevance) in scratch.drain() {
        *results.entry(short_name).or_insert(0.0) += relevance;
      }
    }
  }

  /// NOT yields every cataloged record absent from the child's result set,
  /// each at relevance 1.0.
  fn eval_not(&self, child: &QueryAst, results: &mut ResultMap) {
    let mut matched = ResultMap::new();
    self.eval(child, &mut matched);
    for short_name in self.index.short_names() {
      if !matched.contains_key(short_name) {
        results.insert(short_name.clone(), 1.0);
      }
    }
  }

  /// A term accumulates the field weight of every posting for the folded
  /// token. When stripping separators changes the token (`lang-go` ->
  /// `langgo`), postings for the stripped form are accumulated too.
  fn eval_term(&self, text: &str, results: &mut ResultMap) {
    let folded = fold(text);
    self.accumulate(&folded, results);

    let stripped = strip_separators(&folded);
    if stripped.len() < folded.len() {
      self.accumulate(&stripped, results);
    }
  }

  fn accumulate(&self, token: &str, results: &mut ResultMap) {
    for entry in self.index.postings(token) {
      *results.entry(entry.short_name.clone()).or_insert(0.0) += entry.kind.weight();
    }
  }

  /// A `tag:` atom consults only the exact-tag index; matches get their
  /// relevance pinned at 1.0 rather than accumulated.
  fn eval_tag(&self, text: &str, results: &mut ResultMap) {
    for short_name in self.index.tagged(&fold(text)) {
      results.insert(short_name.clone(), 1.0);
    }
  }
}

/// Sorts hits by descending relevance, ties broken by ascending short name.
/// This total order is what every `Searcher` in this crate returns.
pub(crate) fn sort_hits(hits: &mut [SearchHit]) {
  hits.sort_by(|a, b| {
    b.relevance
      .partial_cmp(&a.relevance)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| a.short_name.cmp(&b.short_name))
  });
}
