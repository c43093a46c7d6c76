//! End-to-end tests: catalog -> index -> query -> ranked results, plus
//! aggregation across backends.

use greenwood::prelude::*;

fn language_catalog() -> InMemCatalog {
  let mut catalog = InMemCatalog::new();
  catalog.insert(Project {
    short_name: "go".to_string(),
    name: "Go".to_string(),
    description: "Compiled, garbage-collected systems language".to_string(),
    tags: vec!["lang-go".to_string(), "compiler".to_string()],
  });
  catalog.insert(Project {
    short_name: "python".to_string(),
    name: "Python".to_string(),
    description: "Interpreted dynamic language".to_string(),
    tags: vec!["lang-python".to_string(), "interpreter".to_string()],
  });
  catalog
}

fn names(hits: &[SearchHit]) -> Vec<&str> {
  hits.iter().map(|h| h.short_name.as_str()).collect()
}

#[test]
fn single_term_matches_tagged_project() {
  let mut catalog = InMemCatalog::new();
  catalog.insert(Project {
    short_name: "go".to_string(),
    name: "Go".to_string(),
    description: "A language".to_string(),
    tags: vec!["go".to_string(), "compiler".to_string()],
  });

  let search = TextSearch::new(&catalog).unwrap();
  let hits = search.search("go").unwrap();
  assert_eq!(names(&hits), vec!["go"]);
  assert!(hits[0].relevance > 0.0);
}

#[test]
fn implicit_and_narrows_to_one_project() {
  let search = TextSearch::new(&language_catalog()).unwrap();
  let hits = search.search("language python").unwrap();
  assert_eq!(names(&hits), vec!["python"]);
}

#[test]
fn or_returns_both_projects_in_order() {
  let search = TextSearch::new(&language_catalog()).unwrap();
  let hits = search.search("GO OR PYTHON").unwrap();
  assert_eq!(names(&hits), vec!["go", "python"]);
}

#[test]
fn unmatched_query_returns_empty_not_error() {
  let search = TextSearch::new(&language_catalog()).unwrap();
  let hits = search.search("bacon").unwrap();
  assert!(hits.is_empty());
}

#[test]
fn tag_atom_ignores_free_text() {
  let search = TextSearch::new(&language_catalog()).unwrap();
  // "language" appears in both descriptions but is nobody's tag.
  assert!(search.search("tag:language").unwrap().is_empty());
  assert_eq!(names(&search.search("tag:interpreter").unwrap()), vec!["python"]);
}

#[test]
fn negation_inverts_the_match_set() {
  let search = TextSearch::new(&language_catalog()).unwrap();
  let hits = search.search("-tag:compiler").unwrap();
  assert_eq!(names(&hits), vec!["python"]);
}

#[test]
fn grouping_and_negation_compose() {
  let search = TextSearch::new(&language_catalog()).unwrap();
  // python scores 1.0 through the tag branch; go gets the verbatim-tag
  // weight 0.8 for "lang-go".
  let hits = search.search("lang-go OR (tag:interpreter -go)").unwrap();
  assert_eq!(names(&hits), vec!["python", "go"]);
}

#[test]
fn malformed_query_surfaces_query_error() {
  let search = TextSearch::new(&language_catalog()).unwrap();
  let err = search.search("(go OR").unwrap_err();
  assert!(matches!(err, SearchError::Query(_)));
}

#[test]
fn rebuild_observes_catalog_changes() {
  let mut catalog = language_catalog();
  let before = TextSearch::new(&catalog).unwrap();

  catalog.insert(Project {
    short_name: "rust".to_string(),
    name: "Rust".to_string(),
    description: "Systems language".to_string(),
    tags: vec!["compiler".to_string()],
  });

  // The old snapshot does not see the new record; a fresh build does.
  assert!(before.search("rust").unwrap().is_empty());
  let after = TextSearch::new(&catalog).unwrap();
  assert_eq!(names(&after.search("rust").unwrap()), vec!["rust"]);
}

struct FailingBackend;

impl Searcher for FailingBackend {
  fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
    Err(SearchError::Query(QueryError {
      input: query.to_string(),
      offset: 0,
      message: "synthetic failure".to_string(),
    }))
  }
}

#[test]
fn aggregate_search_unions_disjoint_backends() {
  let mut other = InMemCatalog::new();
  other.insert(Project {
    short_name: "ruby".to_string(),
    name: "Ruby".to_string(),
    description: "Interpreted dynamic language".to_string(),
    tags: vec!["interpreter".to_string()],
  });

  let engine = AggregateSearch::builder()
    .with(Box::new(TextSearch::new(&language_catalog()).unwrap()))
    .with(Box::new(FailingBackend))
    .with(Box::new(TextSearch::new(&other).unwrap()))
    .build();

  // One backend errors, two return disjoint results; the aggregate succeeds
  // and re-ranks the union.
  let hits = engine.search("tag:interpreter").unwrap();
  assert_eq!(names(&hits), vec!["python", "ruby"]);
}

#[test]
fn highlight_spans_follow_query_terms() {
  let ranges = find_terms("dynamic OR systems", "Interpreted dynamic language");
  assert_eq!(ranges, vec![12..19]);
}
