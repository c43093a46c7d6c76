//! The crate's error umbrella.

use crate::catalog::StoreError;
use crate::query::QueryError;

/// Any failure a [`Searcher`](crate::search::Searcher) can surface.
///
/// Both variants carry enough context (input, offset, operation, cause) for
/// the caller to decide between retrying and surfacing to the user; nothing
/// is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
  /// The query text failed to parse.
  #[error(transparent)]
  Query(#[from] QueryError),
  /// The underlying catalog failed.
  #[error(transparent)]
  Store(#[from] StoreError),
}
