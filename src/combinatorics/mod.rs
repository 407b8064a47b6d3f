//! Lexicographic ranking of fixed-popcount occupation patterns.

use crate::determinant::SpinDeterminant;


/// Computes the binomial coefficient $`\binom{n}{k}`$ by Pascal's recurrence.
///
/// Returns zero when $`k > n`$.
pub fn binom(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut row = vec![0u64; k + 1];
    row[0] = 1;
    for m in 1..=n {
        for j in (1..=k.min(m)).rev() {
            row[j] += row[j - 1];
        }
    }
    row[k]
}

/// Returns the `i`-th (zero-based) occupation pattern of length `n` with exactly `k` occupied
/// orbitals, in lexicographic order.
///
/// Pattern $`0`$ occupies orbitals $`0, \ldots, k-1`$. At each orbital, the first
/// $`\binom{n'-1}{k'-1}`$ of the remaining $`\binom{n'}{k'}`$ patterns occupy it.
///
/// # Panics
///
/// Panics if `i` is not less than $`\binom{n}{k}`$.
pub fn combi(i: u64, n: usize, k: usize) -> SpinDeterminant {
    let n_patterns = binom(n, k);
    assert!(
        i < n_patterns,
        "Pattern index `{i}` is out of range: only {n_patterns} patterns of length {n} with {k} occupied orbitals exist."
    );
    let mut det = SpinDeterminant::new(n);
    let mut i = i;
    let mut k_left = k;
    for orbital in 0..n {
        if k_left == 0 {
            break;
        }
        let n_with = binom(n - orbital - 1, k_left - 1);
        if i < n_with {
            det.set(orbital, true);
            k_left -= 1;
        } else {
            i -= n_with;
        }
    }
    det
}

/// Recovers the lexicographic rank of the pattern formed by the first `n` orbitals of `s`.
///
/// This is the inverse of [`combi`].
///
/// # Panics
///
/// Panics if `s` spans fewer than `n` orbitals or has orbitals at or above `n` occupied.
pub fn unchoose(n: usize, s: &SpinDeterminant) -> u64 {
    assert!(
        n <= s.len(),
        "Cannot rank the first {n} orbitals of `{s}`."
    );
    let k = s.count_ones();
    assert_eq!(
        s.count_ones_in(0..n),
        k,
        "`{s}` has occupied orbitals outside the first {n}."
    );
    let mut rank = 0;
    let mut k_left = k;
    for orbital in 0..n {
        if k_left == 0 || k_left == n - orbital {
            break;
        }
        if s.test(orbital) {
            k_left -= 1;
        } else {
            rank += binom(n - orbital - 1, k_left - 1);
        }
    }
    rank
}

/// Iterates over all occupation patterns of length `n` with `k` occupied orbitals in
/// lexicographic order.
pub fn spin_determinants(n: usize, k: usize) -> impl Iterator<Item = SpinDeterminant> {
    (0..binom(n, k)).map(move |i| combi(i, n, k))
}
