//! Signed occurrences of identifiers.

use std::fmt;
use std::ops::Neg;

/// A signed occurrence of an identifier inside a minterm.
///
/// Literals order by identifier name first, and the positive occurrence
/// comes before the negated one. This is the order in which literals are
/// printed and in which minterm columns are sorted.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Literal {
    name: String,
    negated: bool,
}

impl Literal {
    pub fn new(name: impl Into<String>, negated: bool) -> Self {
        Self {
            name: name.into(),
            negated,
        }
    }

    /// Creates an un-negated literal.
    pub fn positive(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Creates a negated literal.
    pub fn negative(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns true if the literal holds under the given value of its identifier.
    pub fn holds(&self, value: bool) -> bool {
        value != self.negated
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            name: self.name,
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.negated { "!" } else { "" }, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_creation() {
        let pos = Literal::positive("a");
        assert_eq!(pos.name(), "a");
        assert!(!pos.is_negated());

        let neg = Literal::negative("a");
        assert!(neg.is_negated());
        assert_eq!(-neg, pos);
    }

    #[test]
    fn test_literal_holds() {
        assert!(Literal::positive("x").holds(true));
        assert!(!Literal::positive("x").holds(false));
        assert!(Literal::negative("x").holds(false));
        assert!(!Literal::negative("x").holds(true));
    }

    #[test]
    fn test_literal_order() {
        let mut lits = vec![
            Literal::negative("b"),
            Literal::positive("b"),
            Literal::negative("a"),
        ];
        lits.sort();
        assert_eq!(
            lits,
            vec![
                Literal::negative("a"),
                Literal::positive("b"),
                Literal::negative("b"),
            ]
        );
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::positive("space space").to_string(), "space space");
        assert_eq!(Literal::negative("a").to_string(), "!a");
    }
}
