//! The query lexer.
//!
//! Lexing never fails: unrecognized input simply becomes [`TokenKind::Term`]
//! tokens, and every stream is finite and terminated by exactly one
//! [`TokenKind::Eof`].

/// The literal prefix that marks an exact-tag atom.
pub const TAG_PREFIX: &str = "tag:";
/// The literal disjunction keyword. Case-sensitive, never folded.
pub const OR_OPERATOR: &str = "OR";

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// A free-text word.
  Term,
  /// The literal `tag:` marker; always immediately followed by a `Term`.
  Tag,
  /// The literal `OR` keyword.
  Or,
  /// A leading `-`, negating the next atom.
  Not,
  /// `(`
  LParen,
  /// `)`
  RParen,
  /// End of input.
  Eof,
  /// Reserved for an internal lexer invariant violation; never produced by
  /// a well-formed run.
  Invalid,
}

/// A lexical token with its byte offset in the original query, used for
/// parse-error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
  pub pos: usize,
}

impl Token {
  fn new(kind: TokenKind, text: impl Into<String>, pos: usize) -> Self {
    Self {
      kind,
      text: text.into(),
      pos,
    }
  }
}

/// Lexes `query` into tokens.
///
/// The lexer alternates between a default state, which skips whitespace and
/// recognizes `(`, `)`, and a leading `-`, and a term state, which consumes
/// characters until whitespace, a parenthesis, or end of input. A consumed
/// term is then classified: a `tag:` prefix splits into a [`TokenKind::Tag`]
/// token spanning exactly the prefix plus a [`TokenKind::Term`] for the
/// remainder (possibly empty), an exact `OR` becomes [`TokenKind::Or`], and
/// anything else is a plain [`TokenKind::Term`].
pub fn lex(query: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut pos = 0;

  loop {
    pos += leading_len(&query[pos..], |c| c.is_whitespace());

    let Some(c) = query[pos..].chars().next() else {
      tokens.push(Token::new(TokenKind::Eof, "", pos));
      return tokens;
    };

    match c {
      '(' => {
        tokens.push(Token::new(TokenKind::LParen, "(", pos));
        pos += 1;
      }
      ')' => {
        tokens.push(Token::new(TokenKind::RParen, ")", pos));
        pos += 1;
      }
      '-' => {
        tokens.push(Token::new(TokenKind::Not, "-", pos));
        pos += 1;
      }
      _ => {
        let start = pos;
        pos += leading_len(&query[pos..], |c| {
          !c.is_whitespace() && c != '(' && c != ')'
        });
        let word = &query[start..pos];

        if let Some(rest) = word.strip_prefix(TAG_PREFIX) {
          tokens.push(Token::new(TokenKind::Tag, TAG_PREFIX, start));
          tokens.push(Token::new(TokenKind::Term, rest, start + TAG_PREFIX.len()));
        } else if word == OR_OPERATOR {
          tokens.push(Token::new(TokenKind::Or, word, start));
        } else {
          tokens.push(Token::new(TokenKind::Term, word, start));
        }
      }
    }
  }
}

/// Byte length of the longest prefix of `s` whose characters satisfy `f`.
fn leading_len(s: &str, f: impl Fn(char) -> bool) -> usize {
  s.chars()
    .take_while(|&c| f(c))
    .map(char::len_utf8)
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
  }

  fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
  }

  #[test]
  fn test_lex_empty() {
    assert_eq!(kinds(&lex("")), vec![TokenKind::Eof]);
    assert_eq!(kinds(&lex("   ")), vec![TokenKind::Eof]);
  }

  #[test]
  fn test_lex_term() {
    let tokens = lex("hello");
    assert_eq!(kinds(&tokens), vec![TokenKind::Term, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "hello");
    assert_eq!(tokens[0].pos, 0);
  }

  #[test]
  fn test_lex_tag() {
    let tokens = lex("tag:hello");
    assert_eq!(
      kinds(&tokens),
      vec![TokenKind::Tag, TokenKind::Term, TokenKind::Eof]
    );
    assert_eq!(texts(&tokens), vec!["tag:", "hello", ""]);
    assert_eq!(tokens[1].pos, 4);
  }

  #[test]
  fn test_lex_dangling_tag() {
    // "tag:" with nothing after still produces the Tag + Term pair; the
    // parser rejects the empty term.
    let tokens = lex("tag:");
    assert_eq!(
      kinds(&tokens),
      vec![TokenKind::Tag, TokenKind::Term, TokenKind::Eof]
    );
    assert_eq!(tokens[1].text, "");
  }

  #[test]
  fn test_lex_not() {
    let tokens = lex("-hello");
    assert_eq!(
      kinds(&tokens),
      vec![TokenKind::Not, TokenKind::Term, TokenKind::Eof]
    );
    assert_eq!(tokens[1].text, "hello");
  }

  #[test]
  fn test_lex_or() {
    let tokens = lex("hello OR world");
    assert_eq!(
      kinds(&tokens),
      vec![TokenKind::Term, TokenKind::Or, TokenKind::Term, TokenKind::Eof]
    );
    assert_eq!(texts(&tokens), vec!["hello", "OR", "world", ""]);
  }

  #[test]
  fn test_lex_or_is_case_sensitive() {
    let tokens = lex("hello or world");
    assert_eq!(
      kinds(&tokens),
      vec![TokenKind::Term, TokenKind::Term, TokenKind::Term, TokenKind::Eof]
    );
  }

  #[test]
  fn test_lex_parens() {
    let tokens = lex("(a)b");
    assert_eq!(
      kinds(&tokens),
      vec![
        TokenKind::LParen,
        TokenKind::Term,
        TokenKind::RParen,
        TokenKind::Term,
        TokenKind::Eof
      ]
    );
  }

  #[test]
  fn test_lex_dash_inside_term() {
    // '-' only negates at the start of an atom; inside a term it is just a
    // character.
    let tokens = lex("lang-go");
    assert_eq!(kinds(&tokens), vec![TokenKind::Term, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "lang-go");
  }

  #[test]
  fn test_lex_positions() {
    let tokens = lex("  a (b)");
    assert_eq!(tokens[0].pos, 2); // a
    assert_eq!(tokens[1].pos, 4); // (
    assert_eq!(tokens[2].pos, 5); // b
    assert_eq!(tokens[3].pos, 6); // )
  }
}
