//! Four-index labels of two-electron integrals and their classification by index coincidences.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "integrals_tests.rs"]
mod integrals_tests;

// ====================================
// Enum definitions and implementations
// ====================================

/// An enumerated type for the classes of index coincidences of a canonical two-electron integral
/// label $`(i, j, k, l)`$.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntegralCategory {
    /// $`i = l`$: a single orbital referenced four times.
    A,

    /// $`i = k`$ and $`j = l`$: two distinct orbitals, each referenced twice.
    B,

    /// Exactly one of $`i = k`$ or $`j = l`$, with $`j \ne k`$: one orbital referenced twice and
    /// a single excitation between the other two.
    C,

    /// One of $`i = k`$ or $`j = l`$, with $`j = k`$: one orbital referenced three times and a
    /// single excitation between it and the fourth orbital.
    D,

    /// Remaining patterns with $`j = k`$, or with exactly one of $`i = j`$ or $`k = l`$.
    E,

    /// $`i = j`$ and $`k = l`$ with no other coincidences.
    F,

    /// Four distinct orbitals.
    G,
}

impl IntegralCategory {
    /// All categories, in order.
    pub const ALL: [IntegralCategory; 7] = [
        IntegralCategory::A,
        IntegralCategory::B,
        IntegralCategory::C,
        IntegralCategory::D,
        IntegralCategory::E,
        IntegralCategory::F,
        IntegralCategory::G,
    ];

    /// Returns `true` if contributions can be generated for integrals of this category.
    pub fn is_supported(&self) -> bool {
        match self {
            IntegralCategory::A
            | IntegralCategory::B
            | IntegralCategory::C
            | IntegralCategory::D => true,
            IntegralCategory::E | IntegralCategory::F | IntegralCategory::G => false,
        }
    }
}

impl fmt::Display for IntegralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            IntegralCategory::A => "A",
            IntegralCategory::B => "B",
            IntegralCategory::C => "C",
            IntegralCategory::D => "D",
            IntegralCategory::E => "E",
            IntegralCategory::F => "F",
            IntegralCategory::G => "G",
        };
        write!(f, "{c}")
    }
}

// ======================================
// Struct definitions and implementations
// ======================================

/// A structure to label a two-electron integral by four orbital indices.
///
/// For real orbitals, the eight labels related by swapping $`i \leftrightarrow k`$, swapping
/// $`j \leftrightarrow l`$, and swapping the pairs $`(i, k) \leftrightarrow (j, l)`$ refer to the
/// same integral. The canonical representative satisfies
/// - $`i \le k`$,
/// - $`j \le l`$, and
/// - $`k < l`$, or $`k = l`$ and $`i \le j`$.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EriIndex {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
}

impl EriIndex {
    pub fn new(i: usize, j: usize, k: usize, l: usize) -> Self {
        Self { i, j, k, l }
    }

    pub fn to_array(&self) -> [usize; 4] {
        [self.i, self.j, self.k, self.l]
    }

    /// The largest orbital index referenced.
    pub fn max_orbital(&self) -> usize {
        self.i.max(self.j).max(self.k).max(self.l)
    }

    /// Returns `true` if this label is the canonical representative of its equivalence class.
    pub fn is_canonical(&self) -> bool {
        let Self { i, j, k, l } = *self;
        i <= k && j <= l && (k < l || (k == l && i <= j))
    }

    /// Returns the canonical representative of the labels equivalent to this one.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let (i, k) = (self.i.min(self.k), self.i.max(self.k));
        let (j, l) = (self.j.min(self.l), self.j.max(self.l));
        if (k, i) <= (l, j) {
            Self::new(i, j, k, l)
        } else {
            Self::new(j, i, l, k)
        }
    }

    /// Returns all labels equivalent to this one, without duplicates.
    pub fn equivalents(&self) -> Vec<Self> {
        let Self { i, j, k, l } = *self;
        [
            (i, j, k, l),
            (k, j, i, l),
            (i, l, k, j),
            (k, l, i, j),
            (j, i, l, k),
            (l, i, j, k),
            (j, k, l, i),
            (l, k, j, i),
        ]
        .into_iter()
        .map(|(i, j, k, l)| Self::new(i, j, k, l))
        .unique()
        .collect_vec()
    }

    /// Classifies this label by its index coincidences.
    ///
    /// The label is assumed to be canonical; see [`integral_category`].
    pub fn category(&self) -> IntegralCategory {
        integral_category(self)
    }
}

impl From<[usize; 4]> for EriIndex {
    fn from(idx: [usize; 4]) -> Self {
        Self::new(idx[0], idx[1], idx[2], idx[3])
    }
}

impl From<(usize, usize, usize, usize)> for EriIndex {
    fn from((i, j, k, l): (usize, usize, usize, usize)) -> Self {
        Self::new(i, j, k, l)
    }
}

impl fmt::Display for EriIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.i, self.j, self.k, self.l)
    }
}

// =========
// Functions
// =========

/// Classifies a canonical integral label by its index coincidences.
///
/// The decision table is applied in order:
///
/// | Condition                         | Category |
/// |-----------------------------------|----------|
/// | $`i = l`$                         | A        |
/// | $`i = k`$ and $`j = l`$           | B        |
/// | $`i = k`$ or $`j = l`$, $`j = k`$ | D        |
/// | $`i = k`$ or $`j = l`$            | C        |
/// | $`j = k`$                         | E        |
/// | $`i = j`$ and $`k = l`$           | F        |
/// | $`i = j`$ or $`k = l`$            | E        |
/// | otherwise                         | G        |
pub fn integral_category(idx: &EriIndex) -> IntegralCategory {
    let EriIndex { i, j, k, l } = *idx;
    if i == l {
        IntegralCategory::A
    } else if i == k && j == l {
        IntegralCategory::B
    } else if i == k || j == l {
        if j == k {
            IntegralCategory::D
        } else {
            IntegralCategory::C
        }
    } else if j == k {
        IntegralCategory::E
    } else if i == j && k == l {
        IntegralCategory::F
    } else if i == j || k == l {
        IntegralCategory::E
    } else {
        IntegralCategory::G
    }
}
