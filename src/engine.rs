//! Aggregated (federated) search across multiple independent backends.

use crate::error::SearchError;
use crate::search::{sort_hits, SearchHit, Searcher};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A [`Searcher`] that fans one query out to several independent backends
/// and merges their results into a single ranking.
///
/// Every backend receives the same query. The aggregate call waits for all
/// of them (join-all; no partial results, no early return), concatenates the
/// non-empty result lists, and re-sorts by descending relevance with the
/// short-name tie-break. A failing backend contributes nothing and its error
/// is logged; it never fails the aggregated search.
///
/// With the `parallel` feature (the default) the fan-out runs on the rayon
/// thread pool; without it, backends run sequentially in registration order.
/// There is no timeout: a hung backend blocks the aggregated search.
///
/// # Examples
///
/// ```rust
/// use greenwood::prelude::*;
///
/// let mut projects = InMemCatalog::new();
/// projects.insert(Project {
///     short_name: "go".to_string(),
///     name: "Go".to_string(),
///     description: "A compiled language".to_string(),
///     tags: vec!["language".to_string()],
/// });
///
/// let engine = AggregateSearch::builder()
///     .with(Box::new(TextSearch::new(&projects).unwrap()))
///     .build();
///
/// let hits = engine.search("go").unwrap();
/// assert_eq!(hits[0].short_name, "go");
/// ```
#[derive(Default)]
pub struct AggregateSearch {
  backends: Vec<Box<dyn Searcher>>,
}

impl AggregateSearch {
  /// Creates an aggregate over the given backends.
  pub fn new(backends: Vec<Box<dyn Searcher>>) -> Self {
    Self { backends }
  }

  /// Creates a new `AggregateSearchBuilder`.
  pub fn builder() -> AggregateSearchBuilder {
    AggregateSearchBuilder::default()
  }
}

impl Searcher for AggregateSearch {
  fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
    #[cfg(feature = "parallel")]
    let collected: Vec<Vec<SearchHit>> = self
      .backends
      .par_iter()
      .map(|backend| run_backend(backend.as_ref(), query))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let collected: Vec<Vec<SearchHit>> = self
      .backends
      .iter()
      .map(|backend| run_backend(backend.as_ref(), query))
      .collect();

    let mut hits: Vec<SearchHit> = collected.into_iter().flatten().collect();
    sort_hits(&mut hits);
    Ok(hits)
  }
}

/// Runs one backend, converting failure into an empty contribution.
/// Availability beats completeness here: the error only goes to the log.
fn run_backend(backend: &dyn Searcher, query: &str) -> Vec<SearchHit> {
  match backend.search(query) {
    Ok(hits) => hits,
    Err(err) => {
      tracing::warn!(query, error = %err, "search backend failed");
      Vec::new()
    }
  }
}

/// A builder for [`AggregateSearch`].
#[derive(Default)]
pub struct AggregateSearchBuilder {
  backends: Vec<Box<dyn Searcher>>,
}

impl AggregateSearchBuilder {
  /// Adds a search backend.
  pub fn with(mut self, backend: Box<dyn Searcher>) -> Self {
    self.backends.push(backend);
    self
  }

  /// Builds the `AggregateSearch`.
  pub fn build(self) -> AggregateSearch {
    AggregateSearch {
      backends: self.backends,
    }
  }
}
