//! Queries over a list of determinants by partial occupation patterns, and lookup of
//! determinants by their exact occupation patterns.

use std::collections::HashMap;

use crate::determinant::{Determinant, Spin};


/// Orbitals required to be occupied, per spin channel.
pub type OccupancyMask = Determinant;

/// Orbitals required to be unoccupied, per spin channel.
pub type UnoccupancyMask = Determinant;

/// Returns `true` if `det` has every orbital of `occupancy_mask` occupied and every orbital of
/// `unoccupancy_mask` empty, in both spin channels.
pub fn satisfies_masks(
    det: &Determinant,
    occupancy_mask: &OccupancyMask,
    unoccupancy_mask: &UnoccupancyMask,
) -> bool {
    Spin::ALL.iter().all(|&spin| {
        occupancy_mask[spin].is_subset_of(&det[spin])
            && unoccupancy_mask[spin].is_disjoint_from(&det[spin])
    })
}

/// Returns, in ascending order, the indices of all determinants in `psi` that satisfy the given
/// occupancy and unoccupancy masks.
pub fn get_dets_index_satisfying_masks(
    psi: &[Determinant],
    occupancy_mask: &OccupancyMask,
    unoccupancy_mask: &UnoccupancyMask,
) -> Vec<usize> {
    psi.iter()
        .enumerate()
        .filter_map(|(i, det)| {
            if satisfies_masks(det, occupancy_mask, unoccupancy_mask) {
                Some(i)
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
}

// =================
// Trait definitions
// =================

/// Trait for locating a determinant in a list by its exact occupation pattern.
pub trait DeterminantLookup {
    /// Returns the lowest index at which `det` occurs, or `None` if it does not occur at all.
    fn position(&self, det: &Determinant) -> Option<usize>;
}

// ======================================
// Struct definitions and implementations
// ======================================

/// A lookup that scans the determinant list on every query.
#[derive(Clone, Debug)]
pub struct LinearLookup<'a> {
    psi: &'a [Determinant],
}

impl<'a> LinearLookup<'a> {
    pub fn new(psi: &'a [Determinant]) -> Self {
        Self { psi }
    }
}

impl DeterminantLookup for LinearLookup<'_> {
    fn position(&self, det: &Determinant) -> Option<usize> {
        self.psi.iter().position(|d| d == det)
    }
}

/// A lookup backed by a hash index over the determinant list, built once.
///
/// Only the first occurrence of each occupation pattern is indexed.
#[derive(Clone, Debug)]
pub struct HashedLookup {
    positions: HashMap<Determinant, usize>,
}

impl HashedLookup {
    pub fn new(psi: &[Determinant]) -> Self {
        let mut positions = HashMap::with_capacity(psi.len());
        for (i, det) in psi.iter().enumerate() {
            positions.entry(det.clone()).or_insert(i);
        }
        log::debug!(
            "Hashed lookup built over {} determinants ({} unique).",
            psi.len(),
            positions.len()
        );
        Self { positions }
    }

    /// The number of distinct occupation patterns indexed.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl DeterminantLookup for HashedLookup {
    fn position(&self, det: &Determinant) -> Option<usize> {
        self.positions.get(det).copied()
    }
}
