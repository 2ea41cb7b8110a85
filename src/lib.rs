//! # logical-matrix: boolean statements in canonical sum-of-products form
//!
//! **`logical-matrix`** parses textual boolean expressions into a canonical
//! disjunctive normal form and provides an algebra over it. It is meant for
//! rule and policy evaluators: a list of named conditions that are combined,
//! minimized and later evaluated against concrete inputs.
//!
//! ## Representation
//!
//! A [`LogicalMatrix`][crate::matrix::LogicalMatrix] is a list of independent
//! statements over a shared pool of minterms (AND-clauses). Each identifier
//! owns a pair of bit vectors telling in which minterms it occurs positively
//! or negated, and each statement is a bit vector telling which minterms it
//! disjoins. After every operation the matrix is trimmed: unused minterms are
//! dropped, duplicates merged, and absorbed minterms (`a | a & b = a`)
//! removed. See the [`matrix`] module for the details.
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use logical_matrix::matrix::LogicalMatrix;
//!
//! // 1. Parse a list of two statements
//! let rules = LogicalMatrix::parse("admin | owner & !locked, (read OR write) AND owner").unwrap();
//! assert_eq!(rules.statement_count(), 2);
//! assert_eq!(rules.to_string(), "admin | !locked & owner, owner & read | owner & write");
//!
//! // 2. Combine with more rules
//! let audited = &rules & &LogicalMatrix::parse("audited").unwrap();
//! assert_eq!(
//!     audited.to_string(),
//!     "admin & audited | audited & !locked & owner, audited & owner & read | audited & owner & write"
//! );
//!
//! // 3. Evaluate against concrete values
//! let values = HashMap::from([("admin", false), ("owner", true), ("locked", false), ("read", true)]);
//! assert_eq!(rules.evaluate(&values), vec![true, true]);
//! ```
//!
//! ## Core Components
//!
//! - **[`matrix`]**: The [`LogicalMatrix`][crate::matrix::LogicalMatrix] type, trimming, evaluation and statement utilities.
//! - **[`algebra`]**: Conjunction, disjunction, concatenation and negation.
//! - **[`parser`]**: The textual grammar and its options.
//! - **[`ops`]**: Operator syntax (`&`, `|`, `+`, `!`) for the algebra.

pub mod algebra;
pub mod bits;
pub mod error;
pub mod literal;
pub mod matrix;
pub mod ops;
pub mod parser;
