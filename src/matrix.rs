//! The canonical sum-of-products representation.
//!
//! A [`LogicalMatrix`] stores a list of independent boolean statements over a
//! shared pool of minterms. Minterms are never materialized as objects: they
//! are the column dimension shared by two kinds of rows.
//!
//! - **Identifier entries**, one per identifier name, each holding two bit
//!   vectors `positive` and `negative`. Bit `i` of `positive` says that the
//!   identifier occurs un-negated in minterm `i`, bit `i` of `negative` that it
//!   occurs negated. Both clear means the identifier does not constrain minterm
//!   `i`. Both set is allowed and denotes the contradictory minterm `x & !x`.
//! - **Statement rows**, one per statement. Bit `i` of row `j` says that
//!   minterm `i` is one of the disjuncts of statement `j`.
//!
//! ```text
//!           a & b | !c,  c
//!
//!   minterm:     0   1   2
//!   a    +       1   0   0
//!   b    +       1   0   0
//!   c    +       0   1   0
//!        -       0   0   1
//!   row 0        1   0   1
//!   row 1        0   1   0
//! ```
//!
//! Every bit vector has exactly [`minterm_count`][LogicalMatrix::minterm_count]
//! bits. Every public operation that changes the shape ends with [`trim`],
//! which restores the canonical minimal form:
//!
//! 1. columns referenced by no statement are dropped,
//! 2. columns with identical literals are merged,
//! 3. within each statement, a minterm whose literals strictly contain those of
//!    another minterm of the same statement is absorbed (`a | a & b = a`),
//! 4. identifiers left without any literal are dropped,
//! 5. columns are sorted by their literal lists.
//!
//! Because of the last step, two matrices describing the same statements with
//! the same minterms compare equal regardless of how they were derived.
//!
//! [`trim`]: LogicalMatrix::trim

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use log::debug;

use crate::bits::Bits;
use crate::literal::Literal;

/// Literal flags of one identifier across all minterms.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) struct Entry {
    pub(crate) positive: Bits,
    pub(crate) negative: Bits,
}

impl Entry {
    pub(crate) fn new(minterms: usize) -> Self {
        Self {
            positive: Bits::new(minterms),
            negative: Bits::new(minterms),
        }
    }

    pub(crate) fn map(&self, f: impl Fn(&Bits) -> Bits) -> Self {
        Self {
            positive: f(&self.positive),
            negative: f(&self.negative),
        }
    }

    pub(crate) fn or_assign(&mut self, other: &Entry) {
        self.positive.or_assign(&other.positive);
        self.negative.or_assign(&other.negative);
    }

    fn is_significant(&self) -> bool {
        self.positive.any() || self.negative.any()
    }

    fn select(&self, indices: &[usize]) -> Self {
        self.map(|bits| bits.select(indices))
    }
}

/// A list of boolean statements in disjunctive normal form.
///
/// The empty matrix (no statements) stands for "nothing parsed yet" and acts
/// as the identity of every combining operation. It is different from a
/// matrix holding one statement with no minterms, which is always false.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LogicalMatrix {
    pub(crate) entries: BTreeMap<String, Entry>,
    pub(crate) statements: Vec<Bits>,
    pub(crate) minterms: usize,
}

impl LogicalMatrix {
    /// Creates the empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a single statement consisting of one literal.
    ///
    /// ```
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let m = LogicalMatrix::literal("a", true);
    /// assert_eq!(m.to_string(), "!a");
    /// ```
    pub fn literal(name: impl Into<String>, negated: bool) -> Self {
        let (positive, negative) = if negated {
            (Bits::new(1), Bits::single(1, 0))
        } else {
            (Bits::single(1, 0), Bits::new(1))
        };
        let entry = Entry { positive, negative };
        Self {
            entries: BTreeMap::from([(name.into(), entry)]),
            statements: vec![Bits::ones(1)],
            minterms: 1,
        }
    }

    /// Assembles a matrix from raw parts and brings it into canonical form.
    pub(crate) fn from_parts(
        entries: BTreeMap<String, Entry>,
        statements: Vec<Bits>,
        minterms: usize,
    ) -> Self {
        debug_assert!(entries
            .values()
            .all(|e| e.positive.len() == minterms && e.negative.len() == minterms));
        debug_assert!(statements.iter().all(|row| row.len() == minterms));
        let mut matrix = Self {
            entries,
            statements,
            minterms,
        };
        matrix.trim();
        matrix
    }

    /// Returns true if the matrix holds no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Resets the matrix to the empty matrix.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.statements.clear();
        self.minterms = 0;
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    pub fn identifier_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct minterms shared by all statements.
    pub fn minterm_count(&self) -> usize {
        self.minterms
    }

    /// Returns the names of all identifiers occurring in any statement.
    pub fn unique_identifiers(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the literals of minterm `column`, in canonical order.
    pub(crate) fn minterm_literals(&self, column: usize) -> Vec<Literal> {
        let mut literals = Vec::new();
        for (name, entry) in &self.entries {
            if entry.positive.get(column) {
                literals.push(Literal::positive(name.as_str()));
            }
            if entry.negative.get(column) {
                literals.push(Literal::negative(name.as_str()));
            }
        }
        literals
    }

    /// Returns every statement as a list of minterms, each a list of literals.
    ///
    /// ```
    /// use logical_matrix::literal::Literal;
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let m = LogicalMatrix::parse("b & !a | c").unwrap();
    /// assert_eq!(
    ///     m.statements(),
    ///     vec![vec![
    ///         vec![Literal::negative("a"), Literal::positive("b")],
    ///         vec![Literal::positive("c")],
    ///     ]]
    /// );
    /// ```
    pub fn statements(&self) -> Vec<Vec<Vec<Literal>>> {
        let minterms: Vec<Vec<Literal>> =
            (0..self.minterms).map(|c| self.minterm_literals(c)).collect();
        self.statements
            .iter()
            .map(|row| row.iter_ones().map(|c| minterms[c].clone()).collect())
            .collect()
    }

    /// Evaluates every statement under the given assignment.
    ///
    /// A minterm holds if none of its literals is contradicted. An identifier
    /// missing from the assignment contradicts every literal on it, so a
    /// minterm mentioning an unassigned identifier never holds.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let m = LogicalMatrix::parse("a & !b, c").unwrap();
    /// let values = HashMap::from([("a", true), ("b", false)]);
    /// assert_eq!(m.evaluate(&values), vec![true, false]);
    /// ```
    pub fn evaluate<K, S>(&self, assignment: &HashMap<K, bool, S>) -> Vec<bool>
    where
        K: Borrow<str> + Hash + Eq,
        S: BuildHasher,
    {
        debug!(
            "evaluate(minterms = {}, statements = {})",
            self.minterms,
            self.statements.len()
        );

        let mut satisfied = Bits::ones(self.minterms);
        for (name, entry) in &self.entries {
            let violated = match assignment.get(name.as_str()) {
                Some(true) => entry.negative.clone(),
                Some(false) => entry.positive.clone(),
                None => {
                    let mut mask = entry.positive.clone();
                    mask.or_assign(&entry.negative);
                    mask
                }
            };
            satisfied.and_not_assign(&violated);
        }

        self.statements
            .iter()
            .map(|row| row.iter_ones().any(|c| satisfied.get(c)))
            .collect()
    }

    /// Restores the canonical minimal form.
    ///
    /// Running it on a trimmed matrix changes nothing.
    pub fn trim(&mut self) {
        debug!(
            "trim(minterms = {}, identifiers = {}, statements = {})",
            self.minterms,
            self.entries.len(),
            self.statements.len()
        );

        let n = self.minterms;
        let signatures: Vec<Bits> = (0..n).map(|c| self.signature(c)).collect();
        let mut alive = self.referenced();

        // Merge columns with identical literals into the leftmost one.
        for i in 0..n {
            if !alive.get(i) {
                continue;
            }
            for j in (i + 1)..n {
                if alive.get(j) && signatures[i] == signatures[j] {
                    debug!("trim: merge minterm {} into {}", j, i);
                    for row in &mut self.statements {
                        if row.get(j) {
                            row.set(i, true);
                        }
                    }
                    alive.set(j, false);
                }
            }
        }

        // Absorption: `g | s = g` whenever the literals of `g` are a strict subset of those of `s`.
        for row in &mut self.statements {
            let present: Vec<usize> = row.iter_ones().filter(|&c| alive.get(c)).collect();
            for &s in &present {
                let absorbed = present.iter().any(|&g| {
                    g != s
                        && signatures[g] != signatures[s]
                        && signatures[g].is_subset(&signatures[s])
                });
                if absorbed {
                    debug!("trim: absorb minterm {}", s);
                    row.set(s, false);
                }
            }
        }

        let mut used = self.referenced();
        used.and_assign(&alive);

        let mut order: Vec<usize> = used.iter_ones().collect();
        let keys: Vec<Vec<(usize, bool)>> = (0..n).map(|c| self.sort_key(c)).collect();
        order.sort_by(|&x, &y| keys[x].cmp(&keys[y]));

        self.rebuild(&order);
    }

    /// Union of all statement rows.
    fn referenced(&self) -> Bits {
        let mut used = Bits::new(self.minterms);
        for row in &self.statements {
            used.or_assign(row);
        }
        used
    }

    /// Literal pattern of a column: bit `2k` is the positive flag of the `k`-th
    /// identifier, bit `2k + 1` the negative one.
    fn signature(&self, column: usize) -> Bits {
        let mut signature = Bits::new(2 * self.entries.len());
        for (k, entry) in self.entries.values().enumerate() {
            signature.set(2 * k, entry.positive.get(column));
            signature.set(2 * k + 1, entry.negative.get(column));
        }
        signature
    }

    fn sort_key(&self, column: usize) -> Vec<(usize, bool)> {
        let mut key = Vec::new();
        for (k, entry) in self.entries.values().enumerate() {
            if entry.positive.get(column) {
                key.push((k, false));
            }
            if entry.negative.get(column) {
                key.push((k, true));
            }
        }
        key
    }

    /// Keeps only the columns listed in `order`, in that order, and drops
    /// identifiers left without literals.
    fn rebuild(&mut self, order: &[usize]) {
        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(name, entry)| (name, entry.select(order)))
            .filter(|(_, entry)| entry.is_significant())
            .collect();
        for row in &mut self.statements {
            *row = row.select(order);
        }
        self.minterms = order.len();
    }

    /// Removes statement `index` and trims. Out-of-range indices are ignored.
    pub fn remove_statement(&mut self, index: usize) -> &mut Self {
        if index < self.statements.len() {
            debug!("remove_statement(index = {})", index);
            self.statements.remove(index);
            self.trim();
        }
        self
    }

    /// Copies statement `index` out as a standalone matrix.
    pub fn isolate_statement(&self, index: usize) -> Option<LogicalMatrix> {
        let row = self.statements.get(index)?;
        Some(Self::from_parts(
            self.entries.clone(),
            vec![row.clone()],
            self.minterms,
        ))
    }

    /// Splits the matrix into one matrix per statement.
    pub fn split_statements(&self) -> Vec<LogicalMatrix> {
        (0..self.statements.len())
            .filter_map(|i| self.isolate_statement(i))
            .collect()
    }
}

impl fmt::Display for LogicalMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minterms: Vec<String> = (0..self.minterms)
            .map(|c| {
                self.minterm_literals(c)
                    .iter()
                    .map(|lit| lit.to_string())
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect();

        for (j, row) in self.statements.iter().enumerate() {
            if j > 0 {
                f.write_str(", ")?;
            }
            for (k, c) in row.iter_ones().enumerate() {
                if k > 0 {
                    f.write_str(" | ")?;
                }
                f.write_str(&minterms[c])?;
            }
        }
        Ok(())
    }
}
