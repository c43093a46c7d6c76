//! Greenwood - boolean full-text search over small project catalogs.
//!
//! Greenwood indexes a fully enumerable catalog of projects and answers
//! boolean queries combining free-text terms, exact tag lookups (`tag:x`),
//! negation (`-x`), disjunction (`OR`), and parenthesized grouping,
//! returning project short names ranked by relevance.
//!
//! # Example
//!
//! ```rust
//! use greenwood::prelude::*;
//!
//! let mut catalog = InMemCatalog::new();
//! catalog.insert(Project {
//!     short_name: "go".to_string(),
//!     name: "Go".to_string(),
//!     description: "Compiled, garbage-collected language".to_string(),
//!     tags: vec!["compiler".to_string()],
//! });
//! catalog.insert(Project {
//!     short_name: "python".to_string(),
//!     name: "Python".to_string(),
//!     description: "Interpreted dynamic language".to_string(),
//!     tags: vec!["interpreter".to_string()],
//! });
//!
//! let search = TextSearch::new(&catalog).unwrap();
//! let hits = search.search("language -tag:compiler").unwrap();
//! assert_eq!(hits[0].short_name, "python");
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod index;
pub mod query;
pub mod search;
pub mod text;

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::catalog::*;
  pub use crate::engine::*;
  pub use crate::error::*;
  pub use crate::highlight::*;
  pub use crate::index::*;
  pub use crate::query::*;
  pub use crate::search::*;
  pub use crate::text::*;
}
