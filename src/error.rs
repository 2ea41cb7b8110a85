use thiserror::Error;

/// A malformed logical statement.
///
/// Every variant carries the byte offset in the parsed text at which the
/// problem was detected.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    /// An operator, a separator or the end of input has no operand.
    #[error("Malformed logical statement: missing operand at offset {offset}")]
    MissingOperand { offset: usize },

    #[error("Malformed logical statement: unmatched '(' at offset {offset}")]
    UnmatchedOpen { offset: usize },

    #[error("Malformed logical statement: unmatched ')' at offset {offset}")]
    UnmatchedClose { offset: usize },

    /// Two operands follow each other without an operator between them.
    #[error("Malformed logical statement: unexpected operand at offset {offset}")]
    UnexpectedOperand { offset: usize },

    #[error("Malformed logical statement: parentheses nested deeper than {limit} at offset {offset}")]
    TooDeep { offset: usize, limit: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::MissingOperand { offset }
            | ParseError::UnmatchedOpen { offset }
            | ParseError::UnmatchedClose { offset }
            | ParseError::UnexpectedOperand { offset }
            | ParseError::TooDeep { offset, .. } => offset,
        }
    }
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
