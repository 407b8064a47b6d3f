//! Occupation-number representations of spin determinants and two-spin determinants.

use std::error::Error;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Index, IndexMut, Not, Range, Shl, Shr};
use std::str::FromStr;

use bitvec::prelude::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::combinatorics::spin_determinants;

#[cfg(test)]
#[path = "determinant_tests.rs"]
mod determinant_tests;

// ====================================
// Enum definitions and implementations
// ====================================

/// An enumerated type for the two spin channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Spin {
    /// Variant for the spin-up channel.
    Alpha,

    /// Variant for the spin-down channel.
    Beta,
}

impl Spin {
    /// Both spin channels, alpha first.
    pub const ALL: [Spin; 2] = [Spin::Alpha, Spin::Beta];

    /// Returns the other spin channel.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Spin::Alpha => Spin::Beta,
            Spin::Beta => Spin::Alpha,
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spin::Alpha => write!(f, "α"),
            Spin::Beta => write!(f, "β"),
        }
    }
}

// ======================================
// Struct definitions and implementations
// ======================================

// --------------
// SpinDeterminant
// --------------

/// A structure to manage the occupation pattern of a single spin channel over a fixed number of
/// orbitals.
///
/// Bit $`i`$ is set if and only if orbital $`i`$ is occupied. The textual form writes the
/// orbitals from the highest index down to orbital $`0`$, so that `"11000"` denotes a pattern over
/// five orbitals in which orbitals $`3`$ and $`4`$ are occupied.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SpinDeterminant {
    bits: BitVec<u64, Lsb0>,
}

impl SpinDeterminant {
    /// Constructs an empty occupation pattern over `n_orb` orbitals.
    #[must_use]
    pub fn new(n_orb: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, n_orb),
        }
    }

    /// Constructs an occupation pattern over `n_orb` orbitals with the specified orbitals
    /// occupied.
    ///
    /// # Panics
    ///
    /// Panics if any orbital index is not less than `n_orb`.
    pub fn from_orbitals<I>(n_orb: usize, orbitals: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut det = Self::new(n_orb);
        for orbital in orbitals {
            det.set(orbital, true);
        }
        det
    }

    /// The number of orbitals spanned by this pattern.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if this pattern spans no orbitals at all.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns `true` if `orbital` is occupied.
    ///
    /// # Panics
    ///
    /// Panics if `orbital` is out of range.
    pub fn test(&self, orbital: usize) -> bool {
        assert!(
            orbital < self.len(),
            "Orbital index `{orbital}` is out of range for a pattern over {} orbitals.",
            self.len()
        );
        self.bits[orbital]
    }

    /// Sets the occupation of `orbital`.
    ///
    /// # Panics
    ///
    /// Panics if `orbital` is out of range.
    pub fn set(&mut self, orbital: usize, occupied: bool) {
        assert!(
            orbital < self.len(),
            "Orbital index `{orbital}` is out of range for a pattern over {} orbitals.",
            self.len()
        );
        self.bits.set(orbital, occupied);
    }

    /// The number of occupied orbitals.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// The number of occupied orbitals whose indices lie in `range`.
    pub fn count_ones_in(&self, range: Range<usize>) -> usize {
        self.bits[range].count_ones()
    }

    /// The lowest occupied orbital, if any.
    pub fn first_one(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Returns `true` if at least one orbital is occupied.
    pub fn any(&self) -> bool {
        self.bits.any()
    }

    /// Iterates over the occupied orbitals in ascending order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Returns `true` if every orbital occupied in `self` is also occupied in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the two patterns span different numbers of orbitals.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.assert_same_len(other);
        self.words()
            .iter()
            .zip(other.words())
            .all(|(a, b)| a & !b == 0)
    }

    /// Returns `true` if no orbital is occupied in both `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the two patterns span different numbers of orbitals.
    pub fn is_disjoint_from(&self, other: &Self) -> bool {
        self.assert_same_len(other);
        self.words()
            .iter()
            .zip(other.words())
            .all(|(a, b)| a & b == 0)
    }

    /// Moves an electron from `hole` to `particle`.
    ///
    /// # Panics
    ///
    /// Panics if `hole` is not occupied or `particle` is already occupied.
    #[must_use]
    pub fn apply_single_excitation(&self, hole: usize, particle: usize) -> Self {
        assert!(
            self.test(hole),
            "Hole orbital `{hole}` is not occupied in `{self}`."
        );
        assert!(
            !self.test(particle),
            "Particle orbital `{particle}` is already occupied in `{self}`."
        );
        let mut excited = self.clone();
        excited.set(hole, false);
        excited.set(particle, true);
        excited
    }

    fn words(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }

    fn assert_same_len(&self, other: &Self) {
        assert_eq!(
            self.len(),
            other.len(),
            "Mismatched pattern lengths: `{self}` and `{other}`."
        );
    }

    /// Combines two patterns word by word.
    fn zip_words(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        self.assert_same_len(other);
        let mut res = self.clone();
        res.bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.words())
            .for_each(|(a, b)| *a = op(*a, *b));
        res
    }

    /// Clears the storage bits beyond the logical length so that word-wise comparisons stay
    /// exact.
    fn clear_dead_bits(&mut self) {
        let tail = self.len() % (u64::BITS as usize);
        if tail != 0 {
            if let Some(last) = self.bits.as_raw_mut_slice().last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }

    /// Moves every bit $`i`$ to $`i + \textrm{by}`$, dropping bits that fall off the end.
    fn shifted_up(&self, by: usize) -> Self {
        let mut res = self.clone();
        if by >= res.len() {
            res.bits.fill(false);
        } else if by > 0 {
            res.bits.shift_right(by);
        }
        res
    }

    /// Moves every bit $`i`$ to $`i - \textrm{by}`$, dropping bits that fall below zero.
    fn shifted_down(&self, by: usize) -> Self {
        let mut res = self.clone();
        if by >= res.len() {
            res.bits.fill(false);
        } else if by > 0 {
            res.bits.shift_left(by);
        }
        res
    }
}

impl fmt::Display for SpinDeterminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = (0..self.len())
            .rev()
            .map(|i| if self.bits[i] { '1' } else { '0' })
            .collect::<String>();
        write!(f, "{s}")
    }
}

impl fmt::Debug for SpinDeterminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpinDeterminant({self})")
    }
}

#[derive(Debug, Clone)]
pub struct SpinDeterminantParsingError(String);

impl fmt::Display for SpinDeterminantParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Spin determinant parsing error: {}.", self.0)
    }
}

impl Error for SpinDeterminantParsingError {}

impl FromStr for SpinDeterminant {
    type Err = SpinDeterminantParsingError;

    /// Parses a string of `0`s and `1`s whose rightmost character is orbital $`0`$.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n_orb = s.chars().count();
        let mut det = Self::new(n_orb);
        for (orbital, c) in s.chars().rev().enumerate() {
            match c {
                '1' => det.set(orbital, true),
                '0' => {}
                _ => {
                    return Err(SpinDeterminantParsingError(format!(
                        "unexpected character `{c}` in `{s}`"
                    )))
                }
            }
        }
        Ok(det)
    }
}

// ---------------
// Bitwise algebra
// ---------------

impl BitAnd<&'_ SpinDeterminant> for &SpinDeterminant {
    type Output = SpinDeterminant;

    fn bitand(self, rhs: &SpinDeterminant) -> Self::Output {
        self.zip_words(rhs, |a, b| a & b)
    }
}

impl BitAnd<SpinDeterminant> for SpinDeterminant {
    type Output = SpinDeterminant;

    fn bitand(self, rhs: SpinDeterminant) -> Self::Output {
        &self & &rhs
    }
}

impl BitOr<&'_ SpinDeterminant> for &SpinDeterminant {
    type Output = SpinDeterminant;

    fn bitor(self, rhs: &SpinDeterminant) -> Self::Output {
        self.zip_words(rhs, |a, b| a | b)
    }
}

impl BitOr<SpinDeterminant> for SpinDeterminant {
    type Output = SpinDeterminant;

    fn bitor(self, rhs: SpinDeterminant) -> Self::Output {
        &self | &rhs
    }
}

impl BitXor<&'_ SpinDeterminant> for &SpinDeterminant {
    type Output = SpinDeterminant;

    fn bitxor(self, rhs: &SpinDeterminant) -> Self::Output {
        self.zip_words(rhs, |a, b| a ^ b)
    }
}

impl BitXor<SpinDeterminant> for SpinDeterminant {
    type Output = SpinDeterminant;

    fn bitxor(self, rhs: SpinDeterminant) -> Self::Output {
        &self ^ &rhs
    }
}

impl Not for &SpinDeterminant {
    type Output = SpinDeterminant;

    fn not(self) -> Self::Output {
        let mut res = self.clone();
        res.bits
            .as_raw_mut_slice()
            .iter_mut()
            .for_each(|w| *w = !*w);
        res.clear_dead_bits();
        res
    }
}

impl Not for SpinDeterminant {
    type Output = SpinDeterminant;

    fn not(self) -> Self::Output {
        !&self
    }
}

impl Shl<usize> for &SpinDeterminant {
    type Output = SpinDeterminant;

    fn shl(self, rhs: usize) -> Self::Output {
        self.shifted_up(rhs)
    }
}

impl Shl<usize> for SpinDeterminant {
    type Output = SpinDeterminant;

    fn shl(self, rhs: usize) -> Self::Output {
        self.shifted_up(rhs)
    }
}

impl Shr<usize> for &SpinDeterminant {
    type Output = SpinDeterminant;

    fn shr(self, rhs: usize) -> Self::Output {
        self.shifted_down(rhs)
    }
}

impl Shr<usize> for SpinDeterminant {
    type Output = SpinDeterminant;

    fn shr(self, rhs: usize) -> Self::Output {
        self.shifted_down(rhs)
    }
}

// --------
// SpinPair
// --------

/// A pair of quantities, one per spin channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpinPair<T> {
    /// The quantity for the alpha channel.
    pub alpha: T,

    /// The quantity for the beta channel.
    pub beta: T,
}

impl<T> SpinPair<T> {
    pub fn new(alpha: T, beta: T) -> Self {
        Self { alpha, beta }
    }
}

impl<T> Index<Spin> for SpinPair<T> {
    type Output = T;

    fn index(&self, spin: Spin) -> &Self::Output {
        match spin {
            Spin::Alpha => &self.alpha,
            Spin::Beta => &self.beta,
        }
    }
}

impl<T> IndexMut<Spin> for SpinPair<T> {
    fn index_mut(&mut self, spin: Spin) -> &mut Self::Output {
        match spin {
            Spin::Alpha => &mut self.alpha,
            Spin::Beta => &mut self.beta,
        }
    }
}

// -----------
// Determinant
// -----------

/// A determinant, *i.e.* one occupation pattern per spin channel.
pub type Determinant = SpinPair<SpinDeterminant>;

impl SpinPair<SpinDeterminant> {
    /// Constructs a pair of empty occupation patterns over `n_orb` orbitals.
    #[must_use]
    pub fn empty(n_orb: usize) -> Self {
        Self::new(SpinDeterminant::new(n_orb), SpinDeterminant::new(n_orb))
    }

    /// Parses a determinant from the textual forms of its alpha and beta patterns.
    pub fn from_strs(alpha: &str, beta: &str) -> Result<Self, SpinDeterminantParsingError> {
        let alpha = alpha.parse::<SpinDeterminant>()?;
        let beta = beta.parse::<SpinDeterminant>()?;
        if alpha.len() != beta.len() {
            return Err(SpinDeterminantParsingError(format!(
                "alpha pattern `{alpha}` and beta pattern `{beta}` have different lengths"
            )));
        }
        Ok(Self::new(alpha, beta))
    }

    /// Moves an electron of spin `spin` from `hole` to `particle`, leaving the other channel
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if `hole` is not occupied or `particle` is already occupied in channel `spin`.
    #[must_use]
    pub fn apply_single_excitation(&self, spin: Spin, hole: usize, particle: usize) -> Self {
        let mut excited = self.clone();
        excited[spin] = self[spin].apply_single_excitation(hole, particle);
        excited
    }

    /// Builds every determinant with `n_alpha` alpha electrons and `n_beta` beta electrons in
    /// `n_orb` orbitals. The alpha pattern varies slowest, and each channel runs over its
    /// patterns in lexicographic order.
    pub fn full_ci_space(n_orb: usize, n_alpha: usize, n_beta: usize) -> Vec<Self> {
        spin_determinants(n_orb, n_alpha)
            .cartesian_product(spin_determinants(n_orb, n_beta).collect_vec())
            .map(|(alpha, beta)| Self::new(alpha, beta))
            .collect_vec()
    }
}

impl fmt::Display for SpinPair<SpinDeterminant> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.alpha, self.beta)
    }
}
