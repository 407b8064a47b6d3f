//! Integral-driven generation of Hamiltonian matrix-element contributions.
//!
//! For a single two-electron integral label and a list of determinants, the generators in this
//! module enumerate every pair of determinants in the list that the integral couples, together
//! with the fermionic sign of each coupling. The magnitude of every contribution is the value of
//! the integral itself, which is supplied and applied by the caller.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::determinant::{Determinant, Spin, SpinDeterminant};
use crate::integrals::{EriIndex, IntegralCategory};
use crate::matcher::{
    get_dets_index_satisfying_masks, DeterminantLookup, HashedLookup, LinearLookup,
    OccupancyMask, UnoccupancyMask,
};
use crate::phase::{phase_single, Phase};


// ==================
// Struct definitions
// ==================

/// A single excitation within one spin channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleExcitation {
    /// The spin channel in which the electron moves.
    pub spin: Spin,

    /// The orbital the electron is removed from.
    pub hole: usize,

    /// The orbital the electron is placed into.
    pub particle: usize,
}

impl SingleExcitation {
    pub fn new(spin: Spin, hole: usize, particle: usize) -> Self {
        Self {
            spin,
            hole,
            particle,
        }
    }

    /// Applies this excitation to `det`.
    ///
    /// # Panics
    ///
    /// Panics if the hole is empty or the particle is occupied in `det`.
    #[must_use]
    pub fn apply(&self, det: &Determinant) -> Determinant {
        det.apply_single_excitation(self.spin, self.hole, self.particle)
    }

    /// Returns the excitation that undoes this one.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.spin, self.particle, self.hole)
    }

    /// Computes the sign of this excitation acting on `det`.
    pub fn phase(&self, det: &Determinant) -> Phase {
        phase_single(&det[self.spin], self.hole, self.particle)
    }
}

impl fmt::Display for SingleExcitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} → {}{}", self.hole, self.spin, self.particle, self.spin)
    }
}

/// One non-zero contribution of an integral to the Hamiltonian matrix between two determinants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HContribution {
    /// The index of the source determinant.
    pub from_index: usize,

    /// The index of the target determinant.
    pub to_index: usize,

    /// The sign of the contribution.
    pub phase: Phase,

    /// The excitation connecting the source to the target, or `None` for diagonal
    /// contributions.
    pub excitation: Option<SingleExcitation>,
}

impl HContribution {
    /// Constructs a diagonal contribution with positive sign.
    pub fn diagonal(index: usize) -> Self {
        Self {
            from_index: index,
            to_index: index,
            phase: Phase::Positive,
            excitation: None,
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.from_index == self.to_index
    }
}

impl fmt::Display for HContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6} → {:<6} {}",
            self.from_index, self.to_index, self.phase
        )?;
        if let Some(excitation) = self.excitation.as_ref() {
            write!(f, "  [{excitation}]")?;
        }
        Ok(())
    }
}

// ------
// Errors
// ------

/// An enumerated type for failures to generate contributions for an integral.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContributionError {
    /// The integral falls into a category for which no generator exists.
    UnsupportedCategory {
        index: EriIndex,
        category: IntegralCategory,
    },

    /// The integral references an orbital outside the orbital space.
    OrbitalOutOfRange { index: EriIndex, n_orb: usize },

    /// The integral label is not in canonical form.
    NonCanonicalIndex(EriIndex),

    /// A determinant spans a different number of orbitals from the orbital space.
    InconsistentDeterminantLength {
        det_index: usize,
        spin: Spin,
        length: usize,
        n_orb: usize,
    },
}

impl fmt::Display for ContributionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Contribution generation error: ")?;
        match self {
            ContributionError::UnsupportedCategory { index, category } => write!(
                f,
                "integral {index} belongs to category {category}, for which contribution generation is not implemented."
            ),
            ContributionError::OrbitalOutOfRange { index, n_orb } => write!(
                f,
                "integral {index} references orbitals outside the {n_orb}-orbital space."
            ),
            ContributionError::NonCanonicalIndex(index) => write!(
                f,
                "integral {index} is not canonical (expected {}).",
                index.canonical()
            ),
            ContributionError::InconsistentDeterminantLength {
                det_index,
                spin,
                length,
                n_orb,
            } => write!(
                f,
                "the {spin} pattern of determinant {det_index} spans {length} orbitals instead of {n_orb}."
            ),
        }
    }
}

impl Error for ContributionError {}

// ---------
// Generator
// ---------

/// A structure to generate contributions for integrals over a fixed list of determinants.
///
/// The lookup used to locate excited determinants is held for the lifetime of the generator, so
/// that a hashed index over the list can be built once and shared by many integrals.
#[derive(Clone, Debug)]
pub struct ContributionGenerator<'a, L> {
    /// The number of orbitals in each spin channel.
    n_orb: usize,

    /// The determinants spanning the configuration-interaction space.
    psi: &'a [Determinant],

    /// The lookup for locating determinants in [`Self::psi`].
    lookup: L,
}

impl<'a> ContributionGenerator<'a, LinearLookup<'a>> {
    /// Constructs a generator that locates excited determinants by scanning `psi`.
    pub fn linear(n_orb: usize, psi: &'a [Determinant]) -> Result<Self, ContributionError> {
        Self::new(n_orb, psi, LinearLookup::new(psi))
    }
}

impl<'a> ContributionGenerator<'a, HashedLookup> {
    /// Constructs a generator that locates excited determinants through a hash index over `psi`.
    pub fn hashed(n_orb: usize, psi: &'a [Determinant]) -> Result<Self, ContributionError> {
        validate_psi(n_orb, psi)?;
        Ok(Self::unchecked(n_orb, psi, HashedLookup::new(psi)))
    }
}

impl<'a, L> ContributionGenerator<'a, L>
where
    L: DeterminantLookup,
{
    /// Constructs a generator from an explicit lookup over `psi`.
    ///
    /// # Errors
    ///
    /// Errors if any determinant in `psi` does not span exactly `n_orb` orbitals.
    pub fn new(n_orb: usize, psi: &'a [Determinant], lookup: L) -> Result<Self, ContributionError> {
        validate_psi(n_orb, psi)?;
        Ok(Self::unchecked(n_orb, psi, lookup))
    }

    fn unchecked(n_orb: usize, psi: &'a [Determinant], lookup: L) -> Self {
        Self { n_orb, psi, lookup }
    }

    pub fn n_orb(&self) -> usize {
        self.n_orb
    }

    pub fn psi(&self) -> &'a [Determinant] {
        self.psi
    }

    /// Generates all contributions of the integral labelled `index`.
    ///
    /// # Errors
    ///
    /// Errors if `index` references orbitals outside the orbital space, if it is not canonical,
    /// or if it belongs to a category for which no generator exists.
    pub fn contributions(&self, index: &EriIndex) -> Result<Vec<HContribution>, ContributionError> {
        if index.max_orbital() >= self.n_orb {
            return Err(ContributionError::OrbitalOutOfRange {
                index: *index,
                n_orb: self.n_orb,
            });
        }
        if !index.is_canonical() {
            return Err(ContributionError::NonCanonicalIndex(*index));
        }
        let category = index.category();
        log::debug!("Integral {index} classified into category {category}.");
        let contributions = match category {
            IntegralCategory::A => self.category_a(index),
            IntegralCategory::B => self.category_b(index),
            IntegralCategory::C => self.category_c(index),
            IntegralCategory::D => self.category_d(index),
            IntegralCategory::E | IntegralCategory::F | IntegralCategory::G => {
                return Err(ContributionError::UnsupportedCategory {
                    index: *index,
                    category,
                })
            }
        };
        log::debug!(
            "Integral {index} yields {} contribution(s).",
            contributions.len()
        );
        Ok(contributions)
    }

    /// Generates the contributions of an integral $`(ii|ii)`$: one diagonal contribution for each
    /// determinant with orbital $`i`$ doubly occupied.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in category A.
    pub fn category_a(&self, index: &EriIndex) -> Vec<HContribution> {
        assert_category(index, IntegralCategory::A);
        let mut occ = OccupancyMask::empty(self.n_orb);
        occ.alpha.set(index.i, true);
        occ.beta.set(index.i, true);
        let unocc = UnoccupancyMask::empty(self.n_orb);
        get_dets_index_satisfying_masks(self.psi, &occ, &unocc)
            .into_iter()
            .map(HContribution::diagonal)
            .collect::<Vec<_>>()
    }

    /// Generates the contributions of an integral $`(ij|ij)`$ with $`i \ne j`$.
    ///
    /// Four occupation queries are made in turn, and every determinant satisfying a query yields
    /// one diagonal contribution, so a determinant satisfying several queries appears several
    /// times:
    /// 1. $`i`$ and $`j`$ both occupied in the beta channel;
    /// 2. $`i`$ and $`j`$ both occupied in the alpha channel;
    /// 3. $`i`$ occupied in alpha and $`j`$ occupied in beta;
    /// 4. $`j`$ occupied in alpha and $`i`$ occupied in beta.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in category B.
    pub fn category_b(&self, index: &EriIndex) -> Vec<HContribution> {
        assert_category(index, IntegralCategory::B);
        let n_orb = self.n_orb;
        let (i, j) = (index.i, index.j);
        let none = SpinDeterminant::new(n_orb);
        let occ_i = SpinDeterminant::from_orbitals(n_orb, [i]);
        let occ_j = SpinDeterminant::from_orbitals(n_orb, [j]);
        let occ_ij = &occ_i | &occ_j;
        let unocc = UnoccupancyMask::empty(n_orb);

        [
            OccupancyMask::new(none.clone(), occ_ij.clone()),
            OccupancyMask::new(occ_ij, none),
            OccupancyMask::new(occ_i.clone(), occ_j.clone()),
            OccupancyMask::new(occ_j, occ_i),
        ]
        .iter()
        .flat_map(|occ| get_dets_index_satisfying_masks(self.psi, occ, &unocc))
        .map(HContribution::diagonal)
        .collect::<Vec<_>>()
    }

    /// Generates the contributions of an integral with one orbital $`a`$ referenced twice and two
    /// further orbitals $`b`$ and $`c`$, *i.e.* $`(ab|ac)`$ or $`(ba|ca)`$.
    ///
    /// The single excitations $`b \to c`$ and $`c \to b`$ are enumerated in that order, each in
    /// every combination of spin channels for the spectator $`a`$ and the excited electron.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in category C.
    pub fn category_c(&self, index: &EriIndex) -> Vec<HContribution> {
        assert_category(index, IntegralCategory::C);
        let EriIndex { i, j, k, l } = *index;
        let (a, b, c) = if i == k { (i, j, l) } else { (j, i, k) };

        let mut result = vec![];
        self.category_c_abac(a, b, c, &mut result);
        self.category_c_abac(a, c, b, &mut result);
        result
    }

    /// Enumerates the excitations $`b \to c`$ in the presence of an occupied spectator $`a`$.
    fn category_c_abac(&self, a: usize, b: usize, c: usize, result: &mut Vec<HContribution>) {
        for spin_a in Spin::ALL {
            for spin_bc in Spin::ALL {
                let mut occ = OccupancyMask::empty(self.n_orb);
                let mut unocc = UnoccupancyMask::empty(self.n_orb);
                occ[spin_a].set(a, true);
                occ[spin_bc].set(b, true);
                unocc[spin_bc].set(c, true);
                self.push_single_excitations(
                    &occ,
                    &unocc,
                    SingleExcitation::new(spin_bc, b, c),
                    result,
                );
            }
        }
    }

    /// Generates the contributions of an integral with one orbital $`a`$ referenced three times
    /// and a fourth orbital $`b`$, *i.e.* $`(aa|ab)`$ or $`(ba|aa)`$.
    ///
    /// For each spin channel of the excited electron, with $`a`$ occupied in the opposite
    /// channel, the excitations $`b \to a`$ and $`a \to b`$ are enumerated in that order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in category D.
    pub fn category_d(&self, index: &EriIndex) -> Vec<HContribution> {
        assert_category(index, IntegralCategory::D);
        let EriIndex { i, j, l, .. } = *index;
        let (a, b) = if i == j { (i, l) } else { (l, i) };

        let mut result = vec![];
        for spin_ph in Spin::ALL {
            let spin_aa = spin_ph.opposite();
            for (hole, particle) in [(b, a), (a, b)] {
                let mut occ = OccupancyMask::empty(self.n_orb);
                let mut unocc = UnoccupancyMask::empty(self.n_orb);
                occ[spin_ph].set(hole, true);
                occ[spin_aa].set(a, true);
                unocc[spin_ph].set(particle, true);
                self.push_single_excitations(
                    &occ,
                    &unocc,
                    SingleExcitation::new(spin_ph, hole, particle),
                    &mut result,
                );
            }
        }
        result
    }

    /// Applies `excitation` to every determinant satisfying the masks and records a contribution
    /// for each excited determinant present in [`Self::psi`].
    fn push_single_excitations(
        &self,
        occ: &OccupancyMask,
        unocc: &UnoccupancyMask,
        excitation: SingleExcitation,
        result: &mut Vec<HContribution>,
    ) {
        for from_index in get_dets_index_satisfying_masks(self.psi, occ, unocc) {
            let source = &self.psi[from_index];
            let target = excitation.apply(source);
            if let Some(to_index) = self.lookup.position(&target) {
                let contribution = HContribution {
                    from_index,
                    to_index,
                    phase: excitation.phase(source),
                    excitation: Some(excitation),
                };
                log::trace!("{source} → {target}: {contribution}");
                result.push(contribution);
            }
        }
    }
}

// =========
// Functions
// =========

fn assert_category(index: &EriIndex, category: IntegralCategory) {
    assert_eq!(
        index.category(),
        category,
        "Integral {index} does not belong to category {category}."
    );
}

/// Checks that every determinant in `psi` spans exactly `n_orb` orbitals in both channels.
pub fn validate_psi(n_orb: usize, psi: &[Determinant]) -> Result<(), ContributionError> {
    for (det_index, det) in psi.iter().enumerate() {
        for spin in Spin::ALL {
            let length = det[spin].len();
            if length != n_orb {
                return Err(ContributionError::InconsistentDeterminantLength {
                    det_index,
                    spin,
                    length,
                    n_orb,
                });
            }
        }
    }
    Ok(())
}

/// Generates the contributions of a category-A integral over `psi`.
///
/// See [`ContributionGenerator::category_a`].
pub fn category_a(n_orb: usize, index: &EriIndex, psi: &[Determinant]) -> Vec<HContribution> {
    ContributionGenerator::unchecked(n_orb, psi, LinearLookup::new(psi)).category_a(index)
}

/// Generates the contributions of a category-B integral over `psi`.
///
/// See [`ContributionGenerator::category_b`].
pub fn category_b(n_orb: usize, index: &EriIndex, psi: &[Determinant]) -> Vec<HContribution> {
    ContributionGenerator::unchecked(n_orb, psi, LinearLookup::new(psi)).category_b(index)
}

/// Generates the contributions of a category-C integral over `psi`.
///
/// See [`ContributionGenerator::category_c`].
pub fn category_c(n_orb: usize, index: &EriIndex, psi: &[Determinant]) -> Vec<HContribution> {
    ContributionGenerator::unchecked(n_orb, psi, LinearLookup::new(psi)).category_c(index)
}

/// Generates the contributions of a category-D integral over `psi`.
///
/// See [`ContributionGenerator::category_d`].
pub fn category_d(n_orb: usize, index: &EriIndex, psi: &[Determinant]) -> Vec<HContribution> {
    ContributionGenerator::unchecked(n_orb, psi, LinearLookup::new(psi)).category_d(index)
}

/// Classifies the integral labelled `index` and generates its contributions over `psi`.
///
/// # Errors
///
/// Errors if `psi` is inconsistent with `n_orb`, if `index` references orbitals outside the
/// orbital space, if `index` is not canonical, or if `index` belongs to one of the unsupported
/// categories E, F, or G.
pub fn h_contributions(
    n_orb: usize,
    index: &EriIndex,
    psi: &[Determinant],
) -> Result<Vec<HContribution>, ContributionError> {
    ContributionGenerator::linear(n_orb, psi)?.contributions(index)
}
