//! Text normalization shared by indexing and query matching.
//!
//! Every piece of text goes through the same [`fold`] + [`tokenize`] pipeline
//! on both the index-build side and the query side, so a query term can only
//! ever match an indexed token if the two normalizations agree.

/// Case-folds `s` into its canonical, case-insensitive representative.
///
/// ASCII lowercase letters map directly to uppercase; every other ASCII
/// character is left untouched. Non-ASCII code points are mapped to the
/// smallest member of their simple case-mapping orbit, so that e.g. the
/// Kelvin sign and both cases of `k` all fold to the same code point.
///
/// Folding is total and idempotent: `fold(&fold(s)) == fold(s)`.
pub fn fold(s: &str) -> String {
  s.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
  if c.is_ascii_lowercase() {
    return c.to_ascii_uppercase();
  }
  if c.is_ascii() {
    return c;
  }

  // Walk the closure of single-character upper/lower mappings and pick the
  // smallest code point. Orbits are tiny, so a Vec is fine here.
  let mut orbit = vec![c];
  let mut i = 0;
  while i < orbit.len() {
    let cur = orbit[i];
    for mapped in [single_char_upper(cur), single_char_lower(cur)]
      .into_iter()
      .flatten()
    {
      if !orbit.contains(&mapped) {
        orbit.push(mapped);
      }
    }
    i += 1;
  }
  orbit.into_iter().min().unwrap_or(c)
}

/// Returns the uppercase mapping of `c` only when it is a single code point.
/// Multi-character expansions (like `ß` -> `SS`) are not foldable in place.
fn single_char_upper(c: char) -> Option<char> {
  let mut mapped = c.to_uppercase();
  match (mapped.next(), mapped.next()) {
    (Some(u), None) => Some(u),
    _ => None,
  }
}

fn single_char_lower(c: char) -> Option<char> {
  let mut mapped = c.to_lowercase();
  match (mapped.next(), mapped.next()) {
    (Some(l), None) => Some(l),
    _ => None,
  }
}

/// Splits `s` into maximal runs of Unicode letters and numbers.
///
/// Any run of one or more characters that is neither a letter nor a number
/// acts as a separator. An empty or all-separator input produces no tokens.
/// Tokens keep their order of appearance and adjacent runs never merge.
pub fn tokenize(s: &str) -> Vec<String> {
  s.split(|c: char| !c.is_alphanumeric())
    .filter(|token| !token.is_empty())
    .map(str::to_string)
    .collect()
}

/// Removes every separator (non-letter, non-number) character from `s`.
///
/// Used by the evaluator's secondary term lookup: a query term like
/// `lang-go` also gets matched against the separator-free form `langgo`.
pub fn strip_separators(s: &str) -> String {
  s.chars().filter(|c| c.is_alphanumeric()).collect()
}
