//! Fixed-length bit vectors for the minterm columns.
//!
//! Every identifier entry and every statement row of a
//! [`LogicalMatrix`][crate::matrix::LogicalMatrix] is a [`Bits`] whose length is
//! the current minterm count. All reshaping operations (concatenation,
//! stretching, tiling, gathering) return fresh vectors instead of resizing in
//! place, so a matrix can rebuild all of its columns at once.

use std::fmt;

/// A fixed-length bit vector backed by a vector of u64 words.
///
/// Bits past `len` in the last word are always zero, so the derived
/// comparisons agree with comparing the bits themselves.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Bits {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
    /// Number of meaningful bits
    len: usize,
}

impl Bits {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates a vector of `len` cleared bits.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; Self::words_for(len)],
            len,
        }
    }

    /// Creates a vector of `len` set bits.
    pub fn ones(len: usize) -> Self {
        let mut bits = Self {
            words: vec![u64::MAX; Self::words_for(len)],
            len,
        };
        bits.clear_tail();
        bits
    }

    /// Creates a vector of `len` cleared bits with a single bit set.
    pub fn single(len: usize, index: usize) -> Self {
        let mut bits = Self::new(len);
        bits.set(index, true);
        bits
    }

    #[inline]
    fn words_for(len: usize) -> usize {
        (len + Self::BITS_PER_WORD - 1) / Self::BITS_PER_WORD
    }

    /// Gets the word index and bit position for a given bit index.
    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        let word = index / Self::BITS_PER_WORD;
        let bit = index % Self::BITS_PER_WORD;
        (word, bit)
    }

    fn clear_tail(&mut self) {
        let rem = self.len % Self::BITS_PER_WORD;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the vector holds no bits at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if any bit is set.
    #[inline]
    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns the bit at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {} out of range {}", index, self.len);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        (self.words[word_idx] >> bit_idx) & 1 != 0
    }

    /// Sets the bit at the given index to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index {} out of range {}", index, self.len);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        let mask = 1u64 << bit_idx;
        if value {
            self.words[word_idx] |= mask;
        } else {
            self.words[word_idx] &= !mask;
        }
    }

    /// Appends one bit.
    pub fn push(&mut self, value: bool) {
        if self.len % Self::BITS_PER_WORD == 0 {
            self.words.push(0);
        }
        self.len += 1;
        self.set(self.len - 1, value);
    }

    /// Bitwise OR with another vector of the same length.
    pub fn or_assign(&mut self, other: &Bits) {
        assert_eq!(self.len, other.len, "length mismatch");
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    /// Bitwise AND with another vector of the same length.
    pub fn and_assign(&mut self, other: &Bits) {
        assert_eq!(self.len, other.len, "length mismatch");
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= *b;
        }
    }

    /// Clears every bit that is set in `other`.
    pub fn and_not_assign(&mut self, other: &Bits) {
        assert_eq!(self.len, other.len, "length mismatch");
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !*b;
        }
    }

    /// Returns true if every bit set in `self` is also set in `other`.
    pub fn is_subset(&self, other: &Bits) -> bool {
        assert_eq!(self.len, other.len, "length mismatch");
        self.words
            .iter()
            .zip(&other.words)
            .all(|(&a, &b)| a & !b == 0)
    }

    /// Returns `self` followed by `other`.
    pub fn concat(&self, other: &Bits) -> Bits {
        let mut result = self.clone();
        result.words.reserve(Self::words_for(self.len + other.len) - self.words.len());
        for value in other.iter() {
            result.push(value);
        }
        result
    }

    /// Returns `self` followed by `count` cleared bits.
    pub fn pad_back(&self, count: usize) -> Bits {
        self.concat(&Bits::new(count))
    }

    /// Returns `count` cleared bits followed by `self`.
    pub fn pad_front(&self, count: usize) -> Bits {
        Bits::new(count).concat(self)
    }

    /// Repeats each bit `times` times in place.
    ///
    /// ```text
    /// 101.stretch(2) = 110011
    /// ```
    pub fn stretch(&self, times: usize) -> Bits {
        let mut result = Bits::new(self.len * times);
        for i in self.iter_ones() {
            for k in 0..times {
                result.set(i * times + k, true);
            }
        }
        result
    }

    /// Repeats the whole vector `times` times.
    ///
    /// ```text
    /// 101.tile(2) = 101101
    /// ```
    pub fn tile(&self, times: usize) -> Bits {
        let mut result = Bits::new(self.len * times);
        for t in 0..times {
            for i in self.iter_ones() {
                result.set(t * self.len + i, true);
            }
        }
        result
    }

    /// Outer product flattened row-major: bit `i * other.len() + k` is
    /// `self[i] & other[k]`.
    pub fn outer(&self, other: &Bits) -> Bits {
        let mut result = Bits::new(self.len * other.len);
        for i in self.iter_ones() {
            for k in other.iter_ones() {
                result.set(i * other.len + k, true);
            }
        }
        result
    }

    /// Gathers the bits at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Bits {
        let mut result = Bits::new(indices.len());
        for (pos, &i) in indices.iter().enumerate() {
            if self.get(i) {
                result.set(pos, true);
            }
        }
        result
    }

    /// Returns an iterator over all bits.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Returns an iterator over all set bit indices.
    pub fn iter_ones(&self) -> BitsIter<'_> {
        BitsIter {
            bits: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Bits::default();
        for value in iter {
            bits.push(value);
        }
        bits
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            f.write_str(if value { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Iterator over set bits in a [`Bits`].
pub struct BitsIter<'a> {
    bits: &'a Bits,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitsIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * Bits::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.bits.words.len() {
                return None;
            }
            self.current_word = self.bits.words[self.word_idx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Bits {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_empty() {
        let bs = Bits::default();
        assert!(bs.is_empty());
        assert_eq!(bs.len(), 0);
        assert!(!bs.any());
        assert_eq!(bs.iter_ones().count(), 0);
    }

    #[test]
    fn test_set_get() {
        let mut bs = Bits::new(100);
        assert!(!bs.get(42));
        bs.set(42, true);
        assert!(bs.get(42));
        assert_eq!(bs.count_ones(), 1);
        bs.set(42, false);
        assert!(!bs.get(42));
        assert!(!bs.any());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        Bits::new(3).get(3);
    }

    #[test]
    fn test_ones_clears_tail() {
        let bs = Bits::ones(65);
        assert_eq!(bs.count_ones(), 65);
        let mut pushed = Bits::default();
        for _ in 0..65 {
            pushed.push(true);
        }
        assert_eq!(bs, pushed);
    }

    #[test]
    fn test_push_across_words() {
        let mut bs = Bits::default();
        for i in 0..130 {
            bs.push(i % 3 == 0);
        }
        assert_eq!(bs.len(), 130);
        assert!(bs.get(129));
        assert!(!bs.get(128));
        assert_eq!(bs.count_ones(), 44);
    }

    #[test]
    fn test_iter_ones() {
        let mut bs = Bits::new(100);
        bs.set(5, true);
        bs.set(10, true);
        bs.set(3, true);
        bs.set(64, true); // Second word
        bs.set(65, true);

        let indices: Vec<_> = bs.iter_ones().collect();
        assert_eq!(indices, vec![3, 5, 10, 64, 65]);
    }

    #[test]
    fn test_concat_and_pad() {
        assert_eq!(bits("10").concat(&bits("011")), bits("10011"));
        assert_eq!(bits("1").pad_back(2), bits("100"));
        assert_eq!(bits("1").pad_front(2), bits("001"));
    }

    #[test]
    fn test_stretch() {
        assert_eq!(bits("101").stretch(2), bits("110011"));
        assert_eq!(bits("01").stretch(3), bits("000111"));
    }

    #[test]
    fn test_tile() {
        assert_eq!(bits("101").tile(2), bits("101101"));
        assert_eq!(bits("01").tile(3), bits("010101"));
    }

    #[test]
    fn test_outer() {
        // (1,0,1) x (1,1) -> 11 00 11
        assert_eq!(bits("101").outer(&bits("11")), bits("110011"));
        assert_eq!(bits("11").outer(&bits("010")), bits("010010"));
    }

    #[test]
    fn test_select() {
        let bs = bits("10110");
        assert_eq!(bs.select(&[3, 0, 1]), bits("110"));
        assert_eq!(bs.select(&[]), Bits::default());
    }

    #[test]
    fn test_subset_and_or() {
        let a = bits("1000");
        let b = bits("1010");
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));

        let mut c = bits("0001");
        c.or_assign(&a);
        assert_eq!(c, bits("1001"));
        c.and_assign(&b);
        assert_eq!(c, bits("1000"));
        let mut d = bits("1111");
        d.and_not_assign(&b);
        assert_eq!(d, bits("0101"));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", bits("0110")), "0110");
    }
}
