use itertools::Itertools;

use crate::integrals::{integral_category, EriIndex, IntegralCategory};

fn all_indices(n_orb: usize) -> impl Iterator<Item = EriIndex> {
    (0..4)
        .map(move |_| 0..n_orb)
        .multi_cartesian_product()
        .map(|v| EriIndex::new(v[0], v[1], v[2], v[3]))
}

#[test]
fn test_integral_category() {
    assert_eq!(integral_category(&EriIndex::new(2, 2, 2, 2)), IntegralCategory::A);
    assert_eq!(integral_category(&EriIndex::new(0, 1, 0, 1)), IntegralCategory::B);
    assert_eq!(integral_category(&EriIndex::new(1, 2, 1, 4)), IntegralCategory::C);
    assert_eq!(integral_category(&EriIndex::new(0, 2, 1, 2)), IntegralCategory::C);
    assert_eq!(integral_category(&EriIndex::new(1, 1, 1, 3)), IntegralCategory::D);
    assert_eq!(integral_category(&EriIndex::new(1, 3, 3, 3)), IntegralCategory::D);
    assert_eq!(integral_category(&EriIndex::new(0, 1, 1, 2)), IntegralCategory::E);
    assert_eq!(integral_category(&EriIndex::new(0, 0, 1, 2)), IntegralCategory::E);
    assert_eq!(integral_category(&EriIndex::new(0, 1, 2, 2)), IntegralCategory::E);
    assert_eq!(integral_category(&EriIndex::new(0, 0, 1, 1)), IntegralCategory::F);
    assert_eq!(integral_category(&EriIndex::new(0, 1, 2, 3)), IntegralCategory::G);
    assert_eq!(EriIndex::new(0, 1, 2, 3).category(), IntegralCategory::G);
}

#[test]
fn test_integral_category_covers_all_canonical_patterns() {
    let categories = all_indices(5)
        .filter(EriIndex::is_canonical)
        .map(|idx| idx.category())
        .unique()
        .sorted()
        .collect_vec();
    assert_eq!(categories, IntegralCategory::ALL.to_vec());
}

#[test]
fn test_integral_category_coincidences() {
    for idx in all_indices(5).filter(EriIndex::is_canonical) {
        let EriIndex { i, j, k, l } = idx;
        let n_distinct = idx.to_array().iter().unique().count();
        match idx.category() {
            IntegralCategory::A => assert_eq!(n_distinct, 1),
            IntegralCategory::B => assert!(n_distinct == 2 && i == k && j == l),
            IntegralCategory::C => assert_eq!(n_distinct, 3),
            IntegralCategory::D => assert_eq!(n_distinct, 2),
            IntegralCategory::E => assert!(n_distinct == 3 || (n_distinct == 2 && j == k)),
            IntegralCategory::F => assert!(n_distinct == 2 && i == j && k == l),
            IntegralCategory::G => assert_eq!(n_distinct, 4),
        }
    }
}

#[test]
fn test_integral_category_support() {
    let supported = IntegralCategory::ALL
        .iter()
        .filter(|c| c.is_supported())
        .map(|c| c.to_string())
        .join("");
    assert_eq!(supported, "ABCD");
}

#[test]
fn test_eri_index_canonical() {
    assert!(EriIndex::new(0, 1, 0, 1).is_canonical());
    assert!(EriIndex::new(1, 3, 3, 3).is_canonical());
    assert!(!EriIndex::new(1, 0, 0, 1).is_canonical());
    assert!(!EriIndex::new(3, 3, 3, 1).is_canonical());
    assert_eq!(EriIndex::new(3, 3, 3, 1).canonical(), EriIndex::new(1, 3, 3, 3));
    assert_eq!(EriIndex::new(3, 1, 3, 1).canonical(), EriIndex::new(1, 3, 1, 3));
    assert_eq!(EriIndex::new(4, 1, 1, 2).canonical(), EriIndex::new(1, 1, 4, 2).canonical());
    assert_eq!(EriIndex::from([0, 1, 2, 3]), EriIndex::from((0, 1, 2, 3)));
    assert_eq!(EriIndex::new(0, 1, 2, 3).to_string(), "(0, 1, 2, 3)");
    assert_eq!(EriIndex::new(0, 5, 2, 3).max_orbital(), 5);
}

#[test]
fn test_eri_index_canonical_is_class_invariant() {
    for idx in all_indices(4) {
        let canonical = idx.canonical();
        assert!(canonical.is_canonical(), "{canonical} is not canonical.");
        let equivalents = idx.equivalents();
        assert!(equivalents.contains(&canonical));
        assert!(equivalents.iter().all(|eq| eq.canonical() == canonical));
        assert_eq!(
            equivalents.iter().filter(|eq| eq.is_canonical()).count(),
            1,
            "{idx} has more than one canonical equivalent."
        );
        if idx.is_canonical() {
            assert_eq!(canonical, idx);
        }
    }
}
