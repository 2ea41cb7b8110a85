//! Recursive-descent parser for textual statements.
//!
//! # Grammar
//!
//! ```text
//! statement_list := or_expr ( ("," | "\n") or_expr )*
//! or_expr        := and_expr ( ("|" | "||" | "OR") and_expr )*
//! and_expr       := unary ( ("&" | "&&" | "AND") unary )*
//! unary          := ("!" | "NOT")* primary
//! primary        := identifier | "(" statement_list ")"
//! ```
//!
//! Identifiers are whatever lies between operators, with surrounding
//! whitespace trimmed, so `space space` is a single identifier. The word
//! operators `AND`, `OR` and `NOT` are only recognized as whole words.
//!
//! A parenthesized group is parsed by a fresh parser over the inner slice and
//! the result is folded into the enclosing expression through the matrix
//! algebra. Since the inner text is a full statement list, a group may hold
//! several statements: `(a, b) & c` is `a & c, b & c`.
//!
//! # Examples
//!
//! ```
//! use logical_matrix::matrix::LogicalMatrix;
//!
//! let m: LogicalMatrix = "a && NOT b || c, d".parse().unwrap();
//! assert_eq!(m.to_string(), "a & !b | c, d");
//! assert_eq!(m, LogicalMatrix::parse("a AND !b OR c, d").unwrap());
//! ```

use std::str::FromStr;

use log::debug;

use crate::error::{ParseError, Result};
use crate::matrix::LogicalMatrix;

/// Parser options.
///
/// Use `ParserConfig::default()` for the full grammar.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Recognize `AND`, `OR` and `NOT` in addition to the symbolic operators (default: true)
    pub word_operators: bool,
    /// Treat a newline as a statement separator, like `,` (default: true)
    pub newline_separates: bool,
    /// Maximum nesting of parentheses (default: 128)
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            word_operators: true,
            newline_separates: true,
            max_depth: 128,
        }
    }
}

impl ParserConfig {
    /// Parses `input` into a trimmed matrix.
    pub fn parse(&self, input: &str) -> Result<LogicalMatrix> {
        StatementParser::new(self, input, 0, 0).parse()
    }
}

impl LogicalMatrix {
    /// Parses `input` with the default [`ParserConfig`].
    pub fn parse(input: &str) -> Result<LogicalMatrix> {
        ParserConfig::default().parse(input)
    }
}

impl FromStr for LogicalMatrix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        LogicalMatrix::parse(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Token {
    Open,
    Close,
    And,
    Or,
    Not,
    Separator,
}

struct StatementParser<'a> {
    config: &'a ParserConfig,
    input: &'a str,
    /// Offset of `input` in the text handed to the outermost parser.
    offset: usize,
    depth: usize,

    pos: usize,
    /// Start of the pending identifier text.
    last: usize,
    negated: bool,
    /// Result of a parenthesized group waiting for its operator.
    group: Option<LogicalMatrix>,

    conjunction: LogicalMatrix,
    disjunction: LogicalMatrix,
    statements: LogicalMatrix,
}

impl<'a> StatementParser<'a> {
    fn new(config: &'a ParserConfig, input: &'a str, offset: usize, depth: usize) -> Self {
        let start = input.len() - input.trim_start().len();
        let end = input.trim_end().len().max(start);
        Self {
            config,
            input: &input[start..end],
            offset: offset + start,
            depth,
            pos: 0,
            last: 0,
            negated: false,
            group: None,
            conjunction: LogicalMatrix::new(),
            disjunction: LogicalMatrix::new(),
            statements: LogicalMatrix::new(),
        }
    }

    fn parse(mut self) -> Result<LogicalMatrix> {
        debug!("parse(input = {:?}, depth = {})", self.input, self.depth);

        while self.pos < self.input.len() {
            let Some((token, width)) = self.token() else {
                self.pos += 1;
                continue;
            };
            match token {
                Token::Open => self.group()?,
                Token::Close => {
                    return Err(ParseError::UnmatchedClose {
                        offset: self.offset + self.pos,
                    })
                }
                Token::Not => {
                    self.negation()?;
                    self.advance(width);
                }
                Token::And => {
                    self.finish_operand()?;
                    self.advance(width);
                }
                Token::Or => {
                    self.finish_conjunction()?;
                    self.advance(width);
                }
                Token::Separator => {
                    self.finish_statement()?;
                    self.advance(width);
                }
            }
        }
        self.finish_statement()?;

        Ok(self.statements)
    }

    /// Classifies the operator starting at the current position, if any.
    fn token(&self) -> Option<(Token, usize)> {
        let bytes = self.input.as_bytes();
        let next = bytes.get(self.pos + 1).copied();
        match bytes[self.pos] {
            b'(' => Some((Token::Open, 1)),
            b')' => Some((Token::Close, 1)),
            b'!' => Some((Token::Not, 1)),
            b'&' => Some((Token::And, if next == Some(b'&') { 2 } else { 1 })),
            b'|' => Some((Token::Or, if next == Some(b'|') { 2 } else { 1 })),
            b',' => Some((Token::Separator, 1)),
            b'\n' if self.config.newline_separates => Some((Token::Separator, 1)),
            b'A' | b'O' | b'N' if self.config.word_operators => [
                ("AND", Token::And),
                ("OR", Token::Or),
                ("NOT", Token::Not),
            ]
            .into_iter()
            .find(|(word, _)| self.is_word_at(word))
            .map(|(word, token)| (token, word.len())),
            _ => None,
        }
    }

    fn is_word_at(&self, word: &str) -> bool {
        let bytes = self.input.as_bytes();
        let end = self.pos + word.len();
        bytes[self.pos..].starts_with(word.as_bytes())
            && (self.pos == 0 || !is_word_byte(bytes[self.pos - 1]))
            && (end == bytes.len() || !is_word_byte(bytes[end]))
    }

    fn advance(&mut self, width: usize) {
        self.pos += width;
        self.last = self.pos;
    }

    fn pending(&self) -> &'a str {
        self.input[self.last..self.pos].trim()
    }

    /// Fails if an operand is already waiting for its operator.
    fn expect_no_operand(&self) -> Result<()> {
        if self.group.is_some() || !self.pending().is_empty() {
            return Err(ParseError::UnexpectedOperand {
                offset: self.offset + self.pos,
            });
        }
        Ok(())
    }

    fn negation(&mut self) -> Result<()> {
        self.expect_no_operand()?;
        self.negated = !self.negated;
        Ok(())
    }

    fn group(&mut self) -> Result<()> {
        self.expect_no_operand()?;

        let open = self.pos;
        let close = self.matching_close(open).ok_or(ParseError::UnmatchedOpen {
            offset: self.offset + open,
        })?;
        if self.depth >= self.config.max_depth {
            return Err(ParseError::TooDeep {
                offset: self.offset + open,
                limit: self.config.max_depth,
            });
        }

        debug!("group at {}..{}", self.offset + open, self.offset + close);
        let inner = StatementParser::new(
            self.config,
            &self.input[open + 1..close],
            self.offset + open + 1,
            self.depth + 1,
        )
        .parse()?;

        let inner = if self.negated { inner.negate() } else { inner };
        self.negated = false;
        self.group = Some(inner);
        self.advance(close + 1 - self.pos);
        Ok(())
    }

    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, &b) in self.input.as_bytes().iter().enumerate().skip(open) {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Folds the pending operand into the conjunction.
    fn finish_operand(&mut self) -> Result<()> {
        let text = self.pending();
        let operand = match (self.group.take(), text.is_empty()) {
            (Some(group), true) => group,
            (None, false) => LogicalMatrix::literal(text, self.negated),
            (Some(_), false) => {
                return Err(ParseError::UnexpectedOperand {
                    offset: self.offset + self.last,
                })
            }
            (None, true) => {
                return Err(ParseError::MissingOperand {
                    offset: self.offset + self.pos,
                })
            }
        };
        self.negated = false;
        self.conjunction.intersect_with(&operand);
        Ok(())
    }

    /// Folds the conjunction into the disjunction.
    fn finish_conjunction(&mut self) -> Result<()> {
        self.finish_operand()?;
        let conjunction = std::mem::take(&mut self.conjunction);
        self.disjunction.union_with(&conjunction);
        Ok(())
    }

    /// Appends the disjunction as independent statements.
    fn finish_statement(&mut self) -> Result<()> {
        self.finish_conjunction()?;
        let disjunction = std::mem::take(&mut self.disjunction);
        debug!("statement: {}", disjunction);
        self.statements.append(&disjunction);
        Ok(())
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii()
}
