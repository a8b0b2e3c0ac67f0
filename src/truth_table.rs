//! Dynamic truth tables.
//!
//! A Boolean function f: {0,1}ⁿ → {0,1} is stored as its 2ⁿ output bits,
//! packed into 64-bit words. Bit `i` holds the value of `f` at the assignment
//! where variable `k` takes bit `k` of `i`, i.e. variable 0 is the least
//! significant one.
//!
//! Tables with fewer than six variables occupy the low `2ⁿ` bits of a single
//! word; the remaining bits are kept at zero so that word-wise comparisons
//! stay meaningful.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Projection functions for the variables that live inside one word.
const PROJECTIONS: [u64; 6] = [
    0xAAAA_AAAA_AAAA_AAAA,
    0xCCCC_CCCC_CCCC_CCCC,
    0xF0F0_F0F0_F0F0_F0F0,
    0xFF00_FF00_FF00_FF00,
    0xFFFF_0000_FFFF_0000,
    0xFFFF_FFFF_0000_0000,
];

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    num_vars: u32,
    words: Vec<u64>,
}

impl TruthTable {
    const BITS_PER_WORD: usize = 64;

    fn num_words(num_vars: u32) -> usize {
        if num_vars <= 6 {
            1
        } else {
            1 << (num_vars - 6)
        }
    }

    /// Mask of the bits in use in the last word.
    fn mask(&self) -> u64 {
        if self.num_vars >= 6 {
            u64::MAX
        } else {
            (1u64 << (1u32 << self.num_vars)) - 1
        }
    }

    fn normalize(&mut self) {
        let mask = self.mask();
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
    }

    /// The constant-0 function of `num_vars` variables.
    pub fn zero(num_vars: u32) -> Self {
        Self {
            num_vars,
            words: vec![0; Self::num_words(num_vars)],
        }
    }

    /// The constant-1 function of `num_vars` variables.
    pub fn one(num_vars: u32) -> Self {
        let mut tt = Self {
            num_vars,
            words: vec![u64::MAX; Self::num_words(num_vars)],
        };
        tt.normalize();
        tt
    }

    /// Constant function with the given value.
    pub fn constant(num_vars: u32, value: bool) -> Self {
        if value {
            Self::one(num_vars)
        } else {
            Self::zero(num_vars)
        }
    }

    /// The projection onto variable `var`: bit `i` equals bit `var` of `i`.
    ///
    /// # Panics
    ///
    /// Panics if `var >= num_vars`.
    pub fn nth_var(num_vars: u32, var: u32) -> Self {
        assert!(
            var < num_vars,
            "Variable {} out of range for {}-variable function",
            var,
            num_vars
        );
        let mut tt = Self::zero(num_vars);
        if var < 6 {
            tt.words.fill(PROJECTIONS[var as usize]);
        } else {
            let stride = var - 6;
            for (j, word) in tt.words.iter_mut().enumerate() {
                if (j >> stride) & 1 == 1 {
                    *word = u64::MAX;
                }
            }
        }
        tt.normalize();
        tt
    }

    /// Builds a table by evaluating `f` on every index.
    pub fn from_fn(num_vars: u32, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut tt = Self::zero(num_vars);
        for i in 0..tt.num_bits() {
            if f(i) {
                tt.set_bit(i, true);
            }
        }
        tt
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Number of bits (2ⁿ).
    pub fn num_bits(&self) -> usize {
        1 << self.num_vars
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn get_bit(&self, index: usize) -> bool {
        assert!(index < self.num_bits(), "Bit index {} out of range", index);
        let word = self.words[index / Self::BITS_PER_WORD];
        (word >> (index % Self::BITS_PER_WORD)) & 1 == 1
    }

    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < self.num_bits(), "Bit index {} out of range", index);
        let word = &mut self.words[index / Self::BITS_PER_WORD];
        let mask = 1u64 << (index % Self::BITS_PER_WORD);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    pub fn is_const0(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn is_const1(&self) -> bool {
        *self == Self::one(self.num_vars)
    }

    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Complements the table in place.
    pub fn complement(&mut self) {
        for w in self.words.iter_mut() {
            *w = !*w;
        }
        self.normalize();
    }

    /// Index of the first set bit, if any.
    pub fn first_one(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, &w)| w != 0)
            .map(|(j, w)| j * Self::BITS_PER_WORD + w.trailing_zeros() as usize)
    }

    fn zip_with(mut self, rhs: &TruthTable, op: impl Fn(u64, u64) -> u64) -> TruthTable {
        assert_eq!(
            self.num_vars, rhs.num_vars,
            "Truth tables must have the same number of variables"
        );
        for (a, &b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a = op(*a, b);
        }
        self
    }
}

impl Not for TruthTable {
    type Output = TruthTable;

    fn not(mut self) -> Self::Output {
        self.complement();
        self
    }
}

impl Not for &TruthTable {
    type Output = TruthTable;

    fn not(self) -> Self::Output {
        !self.clone()
    }
}

impl BitAnd for TruthTable {
    type Output = TruthTable;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a & b)
    }
}

impl BitAnd for &TruthTable {
    type Output = TruthTable;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone().zip_with(rhs, |a, b| a & b)
    }
}

impl BitOr for TruthTable {
    type Output = TruthTable;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a | b)
    }
}

impl BitOr for &TruthTable {
    type Output = TruthTable;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone().zip_with(rhs, |a, b| a | b)
    }
}

impl BitXor for TruthTable {
    type Output = TruthTable;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a ^ b)
    }
}

impl BitXor for &TruthTable {
    type Output = TruthTable;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.clone().zip_with(rhs, |a, b| a ^ b)
    }
}

/// Prints the bits from the highest index down, like a binary number.
impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.num_bits()).rev() {
            write!(f, "{}", if self.get_bit(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num_vars <= 6 {
            write!(f, "TruthTable({}: {})", self.num_vars, self)
        } else {
            f.debug_struct("TruthTable")
                .field("num_vars", &self.num_vars)
                .field("ones", &self.count_ones())
                .finish()
        }
    }
}
