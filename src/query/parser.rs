//! The recursive-descent query parser.
//!
//! Grammar, tightest binding first:
//!
//! ```text
//! query    := choice*                  implicit AND of choices
//! choice   := primary (OR primary)*    left-associative OR
//! primary  := '-' atom | atom
//! atom     := TERM | TAG TERM | '(' query ')'
//! ```
//!
//! Malformed input is rejected with a structured [`QueryError`] rather than
//! silently truncated: unmatched parentheses, `tag:` without a tag name, a
//! dangling `OR` or `-`, and empty groups are all parse errors.

use crate::query::lexer::{lex, Token, TokenKind};

/// The parsed form of a boolean query.
///
/// The set of variants is closed so that the evaluator's `match` stays
/// exhaustive when the grammar grows. An `And` or `Or` never has fewer than
/// two children; single-child nodes collapse to the child during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAst {
  /// Implicit conjunction of adjacent primaries.
  And(Vec<QueryAst>),
  /// Explicit disjunction via the `OR` keyword.
  Or(Vec<QueryAst>),
  /// Negation of a single sub-expression.
  Not(Box<QueryAst>),
  /// A free-text term.
  Term(String),
  /// A term following a `tag:` marker; matches only the exact-tag index.
  TagTerm(String),
}

/// A structured parse error: the offending input, the byte offset of the
/// construct that failed, and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed query {input:?} at byte {offset}: {message}")]
pub struct QueryError {
  pub input: String,
  pub offset: usize,
  pub message: String,
}

/// Parses `query` into an AST.
///
/// An empty (or all-whitespace) query parses to `Ok(None)`, which is
/// distinct from a well-formed query that happens to match nothing.
pub fn parse(query: &str) -> Result<Option<QueryAst>, QueryError> {
  let mut parser = Parser {
    input: query,
    tokens: lex(query),
    pos: 0,
  };
  let ast = parser.parse_query()?;

  // Anything left over at top level is a stray token, most commonly an
  // unmatched ')'.
  let trailing = parser.peek();
  if trailing.kind != TokenKind::Eof {
    let message = match trailing.kind {
      TokenKind::RParen => "unmatched ')'".to_string(),
      _ => format!("unexpected {:?}", trailing.text),
    };
    return Err(parser.error(trailing.pos, message));
  }
  Ok(ast)
}

struct Parser<'a> {
  input: &'a str,
  tokens: Vec<Token>,
  pos: usize,
}

impl Parser<'_> {
  /// The current token. The token stream always ends with `Eof`, so peeking
  /// saturates there instead of running off the end.
  fn peek(&self) -> &Token {
    let last = self.tokens.len().saturating_sub(1);
    &self.tokens[self.pos.min(last)]
  }

  fn advance(&mut self) -> Token {
    let token = self.peek().clone();
    if self.pos + 1 < self.tokens.len() {
      self.pos += 1;
    }
    token
  }

  fn error(&self, offset: usize, message: impl Into<String>) -> QueryError {
    QueryError {
      input: self.input.to_string(),
      offset,
      message: message.into(),
    }
  }

  fn parse_query(&mut self) -> Result<Option<QueryAst>, QueryError> {
    let mut children = Vec::new();
    while let Some(choice) = self.parse_choice()? {
      children.push(choice);
    }
    Ok(match children.len() {
      0 => None,
      1 => children.pop(),
      _ => Some(QueryAst::And(children)),
    })
  }

  fn parse_choice(&mut self) -> Result<Option<QueryAst>, QueryError> {
    let Some(first) = self.parse_primary()? else {
      return Ok(None);
    };
    let mut children = vec![first];
    while self.peek().kind == TokenKind::Or {
      let or_pos = self.advance().pos;
      match self.parse_primary()? {
        Some(primary) => children.push(primary),
        None => {
          return Err(self.error(or_pos, "OR must be followed by a term or group"))
        }
      }
    }
    Ok(if children.len() == 1 {
      children.pop()
    } else {
      Some(QueryAst::Or(children))
    })
  }

  fn parse_primary(&mut self) -> Result<Option<QueryAst>, QueryError> {
    if self.peek().kind != TokenKind::Not {
      return self.parse_atom();
    }
    let not_pos = self.advance().pos;
    match self.parse_atom()? {
      Some(atom) => Ok(Some(QueryAst::Not(Box::new(atom)))),
      None => Err(self.error(not_pos, "'-' must be followed by a term or group")),
    }
  }

  fn parse_atom(&mut self) -> Result<Option<QueryAst>, QueryError> {
    match self.peek().kind {
      TokenKind::Term => {
        let token = self.advance();
        Ok(Some(QueryAst::Term(token.text)))
      }
      TokenKind::Tag => {
        let tag = self.advance();
        let term = self.peek().clone();
        if term.kind != TokenKind::Term || term.text.is_empty() {
          return Err(self.error(tag.pos, "expected a tag name after \"tag:\""));
        }
        self.advance();
        Ok(Some(QueryAst::TagTerm(term.text)))
      }
      TokenKind::LParen => {
        let open = self.advance();
        let inner = self.parse_query()?;
        if self.peek().kind != TokenKind::RParen {
          return Err(self.error(open.pos, "unmatched '('"));
        }
        self.advance();
        match inner {
          Some(ast) => Ok(Some(ast)),
          None => Err(self.error(open.pos, "empty group")),
        }
      }
      _ => Ok(None),
    }
  }
}
