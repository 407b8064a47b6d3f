//! Fermionic signs of single excitations within one spin channel.

use std::fmt;
use std::ops::{Mul, Neg};

use serde::{Deserialize, Serialize};

use crate::determinant::SpinDeterminant;


/// An enumerated type for the sign attached to a matrix-element contribution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Variant for $`+1`$.
    Positive,

    /// Variant for $`-1`$.
    Negative,
}

impl Phase {
    /// Returns [`Phase::Negative`] for odd parity and [`Phase::Positive`] otherwise.
    pub fn from_parity(odd: bool) -> Self {
        if odd {
            Phase::Negative
        } else {
            Phase::Positive
        }
    }

    pub fn to_i8(self) -> i8 {
        match self {
            Phase::Positive => 1,
            Phase::Negative => -1,
        }
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.to_i8())
    }
}

impl Mul for Phase {
    type Output = Phase;

    fn mul(self, rhs: Phase) -> Self::Output {
        Phase::from_parity(self != rhs)
    }
}

impl Neg for Phase {
    type Output = Phase;

    fn neg(self) -> Self::Output {
        match self {
            Phase::Positive => Phase::Negative,
            Phase::Negative => Phase::Positive,
        }
    }
}

impl From<Phase> for i8 {
    fn from(phase: Phase) -> Self {
        phase.to_i8()
    }
}

impl From<Phase> for f64 {
    fn from(phase: Phase) -> Self {
        phase.to_f64()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.to_i8())
    }
}

fn assert_single_excitation(d: &SpinDeterminant, hole: usize, particle: usize) {
    assert_ne!(
        hole, particle,
        "Hole and particle must be different orbitals."
    );
    assert!(
        d.test(hole),
        "Hole orbital `{hole}` is not occupied in `{d}`."
    );
    assert!(
        !d.test(particle),
        "Particle orbital `{particle}` is already occupied in `{d}`."
    );
}

/// Computes the sign of moving an electron from `hole` to `particle` in `d`.
///
/// The sign is $`-1`$ if an odd number of orbitals strictly between `hole` and `particle` are
/// occupied, and $`+1`$ otherwise.
///
/// # Panics
///
/// Panics if `hole` is not occupied, `particle` is occupied, or the two coincide.
pub fn phase_single(d: &SpinDeterminant, hole: usize, particle: usize) -> Phase {
    assert_single_excitation(d, hole, particle);
    let (lo, hi) = (hole.min(particle), hole.max(particle));
    Phase::from_parity(d.count_ones_in(lo + 1..hi) % 2 == 1)
}

/// Computes the prefix-parity mask of `d`, whose bit $`x`$ is the parity of the number of
/// occupied orbitals with indices $`\le x`$.
///
/// The mask is built by repeatedly folding the pattern onto itself with shifts of
/// $`1, 2, 4, \ldots`$ until the shifted pattern is empty.
pub fn phase_mask(d: &SpinDeterminant) -> SpinDeterminant {
    let mut pm = d.clone();
    let mut shift = 1;
    loop {
        let q = &pm << shift;
        if !q.any() {
            return pm;
        }
        pm = &pm ^ &q;
        shift <<= 1;
    }
}

/// Computes the same sign as [`phase_single`] from the prefix-parity mask of `d`.
///
/// # Panics
///
/// Panics if `hole` is not occupied, `particle` is occupied, or the two coincide.
pub fn phase_single_from_mask(d: &SpinDeterminant, hole: usize, particle: usize) -> Phase {
    assert_single_excitation(d, hole, particle);
    let pm = phase_mask(d);
    let parity = pm.test(hole) ^ pm.test(particle);
    Phase::from_parity(!(parity ^ (particle > hole)))
}
