//! Locating query terms inside display text, for snippet highlighting.

use crate::query::{parse, QueryAst};
use crate::text::fold;
use std::ops::Range;

/// Finds the character-index ranges in `text` of every token equal to a
/// free-text term of `query`.
///
/// The query is parsed with the normal grammar; only `Term` leaves under
/// conjunctions and disjunctions contribute, since negated terms and `tag:`
/// atoms should not light up matching text. Malformed or empty queries
/// produce no ranges. Comparison happens in folded space, and folding is a
/// per-character mapping, so the returned ranges index into the characters
/// of the original `text`.
pub fn find_terms(query: &str, text: &str) -> Vec<Range<usize>> {
  let Ok(Some(ast)) = parse(query) else {
    return Vec::new();
  };
  let mut terms = Vec::new();
  collect_terms(&ast, &mut terms);
  if terms.is_empty() {
    return Vec::new();
  }
  let folded_terms: Vec<String> = terms.iter().map(|t| fold(t)).collect();

  let runes: Vec<char> = fold(text).chars().collect();
  let mut ranges = Vec::new();
  let mut token_start: Option<usize> = None;
  for i in 0..=runes.len() {
    let is_separator = runes.get(i).map_or(true, |c| !c.is_alphanumeric());
    if is_separator {
      if let Some(start) = token_start.take() {
        let token: String = runes[start..i].iter().collect();
        if folded_terms.iter().any(|term| *term == token) {
          ranges.push(start..i);
        }
      }
    } else if token_start.is_none() {
      token_start = Some(i);
    }
  }
  ranges
}

fn collect_terms<'a>(ast: &'a QueryAst, terms: &mut Vec<&'a str>) {
  match ast {
    QueryAst::Term(text) => terms.push(text),
    QueryAst::And(children) | QueryAst::Or(children) => {
      for child in children {
        collect_terms(child, terms);
      }
    }
    QueryAst::Not(_) | QueryAst::TagTerm(_) => {}
  }
}
