//! Operator syntax for the matrix algebra.
//!
//! | Operator       | Method                                                    |
//! |----------------|-----------------------------------------------------------|
//! | `f & g`        | [`intersect`][LogicalMatrix::intersect]                   |
//! | `f \| g`       | [`union_statements`][LogicalMatrix::union_statements]     |
//! | `f + g`        | [`append_statement`][LogicalMatrix::append_statement]     |
//! | `!f`           | [`negate`][LogicalMatrix::negate]                         |
//!
//! Each binary operator is available for owned values and references, together
//! with its compound-assignment form.

use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::matrix::LogicalMatrix;

macro_rules! binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:ident) => {
        impl $trait<&LogicalMatrix> for &LogicalMatrix {
            type Output = LogicalMatrix;

            fn $method(self, rhs: &LogicalMatrix) -> Self::Output {
                self.$op(rhs)
            }
        }

        impl $trait for LogicalMatrix {
            type Output = LogicalMatrix;

            fn $method(self, rhs: LogicalMatrix) -> Self::Output {
                self.$op(&rhs)
            }
        }

        impl $trait<&LogicalMatrix> for LogicalMatrix {
            type Output = LogicalMatrix;

            fn $method(self, rhs: &LogicalMatrix) -> Self::Output {
                self.$op(rhs)
            }
        }

        impl $assign_trait<&LogicalMatrix> for LogicalMatrix {
            fn $assign_method(&mut self, rhs: &LogicalMatrix) {
                *self = self.$op(rhs);
            }
        }

        impl $assign_trait for LogicalMatrix {
            fn $assign_method(&mut self, rhs: LogicalMatrix) {
                *self = self.$op(&rhs);
            }
        }
    };
}

binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, intersect);
binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, union_statements);
binary_op!(Add, add, AddAssign, add_assign, append_statement);

impl Not for &LogicalMatrix {
    type Output = LogicalMatrix;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Not for LogicalMatrix {
    type Output = LogicalMatrix;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn parse(s: &str) -> LogicalMatrix {
        LogicalMatrix::parse(s).unwrap()
    }

    #[test]
    fn test_and() {
        let f = parse("a | b");
        let g = parse("c");
        assert_eq!(&f & &g, f.intersect(&g));
        assert_eq!(f.clone() & g.clone(), f.intersect(&g));

        let mut h = f.clone();
        h &= &g;
        assert_eq!(h.to_string(), "a & c | b & c");
    }

    #[test]
    fn test_or() {
        let f = parse("a & b, c");
        let g = parse("d");
        assert_eq!(&f | &g, f.union_statements(&g));

        let mut h = f.clone();
        h |= g;
        assert_eq!(h.to_string(), "a & b | d, c | d");
    }

    #[test]
    fn test_add() {
        let f = parse("!a & b & c") + parse("d & !e & f") + parse("g & h & !i");
        assert_eq!(f.to_string(), "!a & b & c, d & !e & f, g & h & !i");

        let mut g = parse("a & b");
        g += &parse("a | a & b | a & c");
        assert_eq!(g.to_string(), "a & b, a");
    }

    #[test]
    fn test_not() {
        let f = parse("a & b, !a | !b");
        assert_eq!((!&f).to_string(), "!a | !b, a & b");
        assert_eq!(!!f.clone(), f);
    }

    #[test]
    fn test_mixed_expression() {
        let a = parse("a");
        let b = parse("b");
        let c = parse("c");
        let f = !(&(&a & &b) | &c);
        assert_eq!(f, parse("!(a & b | c)"));
    }
}
