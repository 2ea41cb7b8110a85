//! Conjunction, disjunction, concatenation and negation of statement lists.
//!
//! All operations are copy-derived: the operands are left untouched and the
//! result is returned trimmed. The `*_with` and `*_statement` variants work in
//! place and return `&mut Self` for chaining.
//!
//! The empty matrix is the identity of [`intersect`], [`union_statements`] and
//! [`append_statement`]: combining anything with "no constraint yet" returns
//! the other operand unchanged. Note that for conjunction this is not the
//! absorbing element of two-valued logic.
//!
//! [`intersect`]: LogicalMatrix::intersect
//! [`union_statements`]: LogicalMatrix::union_statements
//! [`append_statement`]: LogicalMatrix::append_statement

use std::collections::BTreeMap;

use log::debug;

use crate::bits::Bits;
use crate::matrix::{Entry, LogicalMatrix};

impl LogicalMatrix {
    /// Conjunction.
    ///
    /// Every minterm of `self` is paired with every minterm of `other`, and
    /// every statement of `self` with every statement of `other`:
    ///
    /// ```text
    /// (a & b | c & d) & (e | f) = a & b & e | a & b & f | c & d & e | c & d & f
    /// (s1, s2) & (t1, t2)       = s1 & t1, s1 & t2, s2 & t1, s2 & t2
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let f = LogicalMatrix::parse("a | b").unwrap();
    /// let g = LogicalMatrix::parse("c").unwrap();
    /// assert_eq!(f.intersect(&g).to_string(), "a & c | b & c");
    /// ```
    pub fn intersect(&self, other: &LogicalMatrix) -> LogicalMatrix {
        debug!("intersect(self = {}, other = {})", self, other);

        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let n1 = self.minterms;
        let n2 = other.minterms;

        // Minterm `i * n2 + k` is the conjunction of minterm `i` of `self` and minterm `k` of `other`.
        let mut entries: BTreeMap<String, Entry> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.map(|bits| bits.stretch(n2))))
            .collect();
        for (name, entry) in &other.entries {
            merge_entry(&mut entries, name, entry.map(|bits| bits.tile(n1)));
        }

        let statements: Vec<Bits> = self
            .statements
            .iter()
            .flat_map(|s| other.statements.iter().map(move |t| s.outer(t)))
            .collect();

        LogicalMatrix::from_parts(entries, statements, n1 * n2)
    }

    /// Disjunction.
    ///
    /// The minterm pools are concatenated, and every statement of `self` is
    /// joined with every statement of `other`:
    ///
    /// ```text
    /// (s1, s2) | (t1, t2) = s1 | t1, s1 | t2, s2 | t1, s2 | t2
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let f = LogicalMatrix::parse("a & b, c").unwrap();
    /// let g = LogicalMatrix::parse("d").unwrap();
    /// assert_eq!(f.union_statements(&g).to_string(), "a & b | d, c | d");
    /// ```
    pub fn union_statements(&self, other: &LogicalMatrix) -> LogicalMatrix {
        debug!("union_statements(self = {}, other = {})", self, other);

        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let entries = self.disjoint_entries(other);
        let statements: Vec<Bits> = self
            .statements
            .iter()
            .flat_map(|s| other.statements.iter().map(move |t| s.concat(t)))
            .collect();

        LogicalMatrix::from_parts(entries, statements, self.minterms + other.minterms)
    }

    /// Concatenates the statement lists without mixing them.
    ///
    /// # Examples
    ///
    /// ```
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let f = LogicalMatrix::parse("a & b").unwrap();
    /// let g = LogicalMatrix::parse("c | d").unwrap();
    /// assert_eq!(f.append_statement(&g).to_string(), "a & b, c | d");
    /// ```
    pub fn append_statement(&self, other: &LogicalMatrix) -> LogicalMatrix {
        self.insert_statement(self.statements.len(), other)
    }

    /// Inserts the statements of `other` before statement `index` of `self`.
    ///
    /// Indices past the end append.
    pub fn insert_statement(&self, index: usize, other: &LogicalMatrix) -> LogicalMatrix {
        debug!(
            "insert_statement(self = {}, index = {}, other = {})",
            self, index, other
        );

        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let n1 = self.minterms;
        let n2 = other.minterms;
        let index = index.min(self.statements.len());

        let entries = self.disjoint_entries(other);
        let mut statements: Vec<Bits> = self.statements.iter().map(|s| s.pad_back(n2)).collect();
        statements.splice(
            index..index,
            other.statements.iter().map(|t| t.pad_front(n1)),
        );

        LogicalMatrix::from_parts(entries, statements, n1 + n2)
    }

    /// Negation, applied to each statement independently.
    ///
    /// Every minterm is inverted by De Morgan's law into a disjunction of
    /// negated literals, and the inverses of all minterms of a statement are
    /// conjoined:
    ///
    /// ```text
    /// !(a & !b | c & d) = (!a | b) & (!c | !d) = !a & !c | !a & !d | b & !c | b & !d
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let f = LogicalMatrix::parse("a & b, !c").unwrap();
    /// assert_eq!(f.negate().to_string(), "!a | !b, c");
    /// ```
    pub fn negate(&self) -> LogicalMatrix {
        debug!("negate(self = {})", self);

        self.statements
            .iter()
            .fold(LogicalMatrix::new(), |acc, row| {
                acc.append_statement(&self.negate_row(row))
            })
    }

    fn negate_row(&self, row: &Bits) -> LogicalMatrix {
        let product = row
            .iter_ones()
            .fold(LogicalMatrix::new(), |acc, column| {
                acc.intersect(&self.inverse(column))
            });
        if product.is_empty() {
            // A statement without minterms stays without minterms.
            return LogicalMatrix::from_parts(BTreeMap::new(), vec![Bits::default()], 0);
        }
        product
    }

    /// De Morgan inverse of one minterm: a single statement with one minterm
    /// per literal, sign flipped.
    fn inverse(&self, column: usize) -> LogicalMatrix {
        let literals = self.minterm_literals(column);
        let k = literals.len();

        let mut entries: BTreeMap<String, Entry> = BTreeMap::new();
        for (i, lit) in literals.iter().enumerate() {
            let entry = entries
                .entry(lit.name().to_string())
                .or_insert_with(|| Entry::new(k));
            if lit.is_negated() {
                entry.positive.set(i, true);
            } else {
                entry.negative.set(i, true);
            }
        }

        LogicalMatrix::from_parts(entries, vec![Bits::ones(k)], k)
    }

    /// Folds all statements through conjunction into a single statement.
    ///
    /// # Examples
    ///
    /// ```
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let f = LogicalMatrix::parse("a | b, c").unwrap();
    /// assert_eq!(f.combine_statements().to_string(), "a & c | b & c");
    /// ```
    pub fn combine_statements(&self) -> LogicalMatrix {
        debug!("combine_statements(self = {})", self);
        self.split_statements()
            .iter()
            .fold(LogicalMatrix::new(), |acc, s| acc.intersect(s))
    }

    /// Identifier entries over the concatenated minterm pool `self ++ other`.
    fn disjoint_entries(&self, other: &LogicalMatrix) -> BTreeMap<String, Entry> {
        let n1 = self.minterms;
        let n2 = other.minterms;

        let mut entries: BTreeMap<String, Entry> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.map(|bits| bits.pad_back(n2))))
            .collect();
        for (name, entry) in &other.entries {
            let entry = entry.map(|bits| bits.pad_front(n1));
            match entries.get_mut(name) {
                Some(existing) => {
                    // Disjoint columns: OR is concatenation here.
                    existing.or_assign(&entry);
                }
                None => {
                    entries.insert(name.clone(), entry);
                }
            }
        }
        entries
    }
}

/// Merges `entry` into the entry named `name`, if any.
fn merge_entry(entries: &mut BTreeMap<String, Entry>, name: &str, entry: Entry) {
    match entries.get_mut(name) {
        Some(existing) => existing.or_assign(&entry),
        None => {
            entries.insert(name.to_string(), entry);
        }
    }
}

// In-place and per-statement variants.
impl LogicalMatrix {
    pub fn intersect_with(&mut self, other: &LogicalMatrix) -> &mut Self {
        *self = self.intersect(other);
        self
    }

    pub fn union_with(&mut self, other: &LogicalMatrix) -> &mut Self {
        *self = self.union_statements(other);
        self
    }

    pub fn append(&mut self, other: &LogicalMatrix) -> &mut Self {
        *self = self.append_statement(other);
        self
    }

    pub fn negate_in_place(&mut self) -> &mut Self {
        *self = self.negate();
        self
    }

    /// Negates statement `index` only. Out-of-range indices are ignored.
    ///
    /// ```
    /// use logical_matrix::matrix::LogicalMatrix;
    ///
    /// let mut f = LogicalMatrix::parse("a, b & c, d").unwrap();
    /// f.negate_statement(1);
    /// assert_eq!(f.to_string(), "a, !b | !c, d");
    /// ```
    pub fn negate_statement(&mut self, index: usize) -> &mut Self {
        if let Some(statement) = self.isolate_statement(index) {
            debug!("negate_statement(index = {})", index);
            self.replace_statement(index, &statement.negate());
        }
        self
    }

    /// Conjoins `other` into statement `index` only. Out-of-range indices are ignored.
    pub fn intersect_statement(&mut self, index: usize, other: &LogicalMatrix) -> &mut Self {
        if let Some(statement) = self.isolate_statement(index) {
            debug!("intersect_statement(index = {})", index);
            self.replace_statement(index, &statement.intersect(other));
        }
        self
    }

    /// Disjoins `other` into statement `index` only. Out-of-range indices are ignored.
    pub fn union_statement(&mut self, index: usize, other: &LogicalMatrix) -> &mut Self {
        if let Some(statement) = self.isolate_statement(index) {
            debug!("union_statement(index = {})", index);
            self.replace_statement(index, &statement.union_statements(other));
        }
        self
    }

    /// Replaces statement `index` by the statements of `replacement`.
    fn replace_statement(&mut self, index: usize, replacement: &LogicalMatrix) {
        let mut rest = std::mem::take(self);
        rest.statements.remove(index);
        *self = rest.insert_statement(index, replacement);
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
    fn test_intersect_single() {
        assert_eq!(parse("a & b").intersect(&parse("c & d")).to_string(), "a & b & c & d");
        assert_eq!(parse("a & b").intersect(&parse("a & b")).to_string(), "a & b");
        assert_eq!(
            parse("a & b").intersect(&parse("a | a & b | a & c")).to_string(),
            "a & b"
        );
    }

    #[test]
    fn test_intersect_cross_product() {
        let f = parse("!a | b | c")
            .intersect(&parse("d | !e | f"))
            .intersect(&parse("g | h | !i"));
        assert_eq!(f.minterm_count(), 27);
        assert_eq!(f.identifier_count(), 9);
        assert_eq!(
            f.to_string(),
            "!a & d & g | !a & d & h | !a & d & !i | !a & !e & g | !a & !e & h | !a & !e & !i \
             | !a & f & g | !a & f & h | !a & f & !i | b & d & g | b & d & h | b & d & !i \
             | b & !e & g | b & !e & h | b & !e & !i | b & f & g | b & f & h | b & f & !i \
             | c & d & g | c & d & h | c & d & !i | c & !e & g | c & !e & h | c & !e & !i \
             | c & f & g | c & f & h | c & f & !i"
        );
    }

    #[test]
    fn test_intersect_statement_lists() {
        let f = parse("a & b, c | d");
        assert_eq!(
            f.intersect(&parse("e & f")).to_string(),
            "a & b & e & f, c & e & f | d & e & f"
        );
        assert_eq!(
            f.intersect(&parse("a & b, d & e")).to_string(),
            "a & b, a & b & d & e, a & b & c | a & b & d, d & e"
        );
        assert_eq!(f.intersect(&parse("a | b, c & d, e")).statement_count(), 6);
    }

    #[test]
    fn test_empty_is_identity() {
        let f = parse("a & b, c | d");
        let empty = LogicalMatrix::new();
        assert_eq!(f.intersect(&empty), f);
        assert_eq!(empty.intersect(&f), f);
        assert_eq!(f.union_statements(&empty), f);
        assert_eq!(empty.union_statements(&f), f);
        assert_eq!(f.append_statement(&empty), f);
        assert_eq!(empty.append_statement(&f), f);
        assert!(empty.negate().is_empty());
    }

    #[test]
    fn test_union_single() {
        assert_eq!(parse("a & b").union_statements(&parse("c & d")).to_string(), "a & b | c & d");
        assert_eq!(parse("a & b").union_statements(&parse("a & b")).to_string(), "a & b");
        assert_eq!(
            parse("a & b").union_statements(&parse("a | a & b | a & c")).to_string(),
            "a"
        );
        assert_eq!(
            parse("!a & b & c")
                .union_statements(&parse("d & !e & f"))
                .union_statements(&parse("g & h & !i"))
                .to_string(),
            "!a & b & c | d & !e & f | g & h & !i"
        );
    }

    #[test]
    fn test_union_statement_lists() {
        let f = parse("a & b, c | d");
        assert_eq!(
            f.union_statements(&parse("e & f")).to_string(),
            "a & b | e & f, c | d | e & f"
        );
        assert_eq!(
            f.union_statements(&parse("a & b, d & e")).to_string(),
            "a & b, a & b | d & e, a & b | c | d, c | d"
        );
        assert_eq!(
            f.union_statements(&parse("a | b, c & d, e")).to_string(),
            "a | b, a & b | c & d, a & b | e, a | b | c | d, c | d, c | d | e"
        );
    }

    #[test]
    fn test_append() {
        let f = parse("a & b");
        assert_eq!(f.append_statement(&parse("c & d")).to_string(), "a & b, c & d");
        assert_eq!(f.append_statement(&parse("a & b")).to_string(), "a & b, a & b");
        assert_eq!(
            f.append_statement(&parse("a | a & b | a & c")).to_string(),
            "a & b, a"
        );

        let g = parse("a & b, c | d");
        let appended = g.append_statement(&parse("a | b, c & d, e"));
        assert_eq!(appended.to_string(), "a & b, c | d, a | b, c & d, e");
        assert_eq!(appended.statement_count(), 5);
    }

    #[test]
    fn test_insert_statement() {
        let f = parse("a, b");
        assert_eq!(f.insert_statement(0, &parse("c")).to_string(), "c, a, b");
        assert_eq!(f.insert_statement(1, &parse("c, d")).to_string(), "a, c, d, b");
        assert_eq!(f.insert_statement(9, &parse("c")).to_string(), "a, b, c");
    }

    #[test]
    fn test_negate() {
        assert_eq!(parse("a & b").negate().to_string(), "!a | !b");
        assert_eq!(parse("!a | !b").negate().to_string(), "a & b");
        assert_eq!(
            parse("a & !b | c & d").negate().to_string(),
            "!a & !c | !a & !d | b & !c | b & !d"
        );
    }

    #[test]
    fn test_negate_statement_list() {
        let f = parse("a & b, !a | !b, a & !b | c & d");
        assert_eq!(
            f.negate().to_string(),
            "!a | !b, a & b, !a & !c | !a & !d | b & !c | b & !d"
        );
        assert_eq!(f.negate().statement_count(), 3);
    }

    #[test]
    fn test_negate_contradiction() {
        // !(a & !a) = !a | a
        assert_eq!(parse("a & !a").negate().to_string(), "a | !a");
        // !(a | !a) = !a & a
        assert_eq!(parse("a | !a").negate().to_string(), "a & !a");
    }

    #[test]
    fn test_negate_involution() {
        for s in ["a", "a & b", "c | a & b", "a & !b | c & d, e", "!a & b & c | d & !e & f"] {
            let f = parse(s);
            assert_eq!(f.negate().negate(), f, "double negation of {}", s);
        }
    }

    #[test]
    fn test_negate_statement() {
        let mut f = parse("a & b, c | d, e");
        f.negate_statement(1);
        assert_eq!(f.to_string(), "a & b, !c & !d, e");
        f.negate_statement(1);
        assert_eq!(f, parse("a & b, c | d, e"));

        let before = f.clone();
        f.negate_statement(3);
        assert_eq!(f, before);
    }

    #[test]
    fn test_intersect_and_union_statement() {
        let mut f = parse("a, b");
        f.intersect_statement(0, &parse("c | d"));
        assert_eq!(f.to_string(), "a & c | a & d, b");

        let mut g = parse("a, b");
        g.union_statement(1, &parse("c"));
        assert_eq!(g.to_string(), "a, b | c");

        // A statement list splices in all of its statements.
        let mut h = parse("a, b");
        h.union_statement(0, &parse("c, d"));
        assert_eq!(h.to_string(), "a | c, a | d, b");

        let before = h.clone();
        h.intersect_statement(7, &parse("z"));
        assert_eq!(h, before);
    }

    #[test]
    fn test_single_statement_replace() {
        let mut f = parse("a & b");
        f.negate_statement(0);
        assert_eq!(f.to_string(), "!a | !b");
    }

    #[test]
    fn test_combine_statements() {
        assert_eq!(parse("a, b, c").combine_statements().to_string(), "a & b & c");
        assert_eq!(parse("a | b, !a").combine_statements().to_string(), "a & !a | !a & b");
        assert!(LogicalMatrix::new().combine_statements().is_empty());
    }

    #[test]
    fn test_in_place_chaining() {
        let mut f = parse("a");
        f.intersect_with(&parse("b")).union_with(&parse("c")).append(&parse("d"));
        assert_eq!(f.to_string(), "a & b | c, d");
        f.negate_in_place();
        assert_eq!(f.to_string(), "!a & !c | !b & !c, !d");
    }
}
