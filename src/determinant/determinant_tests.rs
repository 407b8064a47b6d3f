use itertools::Itertools;

use crate::determinant::{Determinant, Spin, SpinDeterminant};

fn sd(s: &str) -> SpinDeterminant {
    s.parse::<SpinDeterminant>().unwrap()
}

#[test]
fn test_spin_determinant_textual_form() {
    let d = sd("11000");
    assert_eq!(d.len(), 5);
    assert_eq!(d.iter_occupied().collect_vec(), vec![3, 4]);
    assert!(!d.test(0));
    assert!(d.test(3));
    assert_eq!(d.to_string(), "11000");
    assert_eq!(d, SpinDeterminant::from_orbitals(5, [3, 4]));

    let d = sd("0000000000000000000000000000000000000000000000000000000000000000000101");
    assert_eq!(d.len(), 70);
    assert_eq!(d.iter_occupied().collect_vec(), vec![0, 2]);

    assert!("10a1".parse::<SpinDeterminant>().is_err());
    assert!(Determinant::from_strs("101", "1").is_err());
}

#[test]
fn test_spin_determinant_queries() {
    let d = sd("0101100");
    assert_eq!(d.count_ones(), 3);
    assert_eq!(d.first_one(), Some(2));
    assert!(d.any());
    assert_eq!(d.count_ones_in(0..3), 1);
    assert_eq!(d.count_ones_in(3..7), 2);
    assert_eq!(d.count_ones_in(4..4), 0);

    let e = SpinDeterminant::new(7);
    assert_eq!(e.first_one(), None);
    assert!(!e.any());
    assert_eq!(e.to_string(), "0000000");
}

#[test]
fn test_spin_determinant_bitwise() {
    let a = sd("11000");
    let b = sd("10010");
    assert_eq!(&a & &b, sd("10000"));
    assert_eq!(&a | &b, sd("11010"));
    assert_eq!(&a ^ &b, sd("01010"));
    assert_eq!(!&a, sd("00111"));
    assert_eq!(!!a.clone(), a);
    assert_eq!(a.clone() & b.clone(), sd("10000"));
    assert_eq!(a.clone() | b.clone(), sd("11010"));

    // Complements must not leak into storage beyond the logical length.
    let wide = SpinDeterminant::new(67);
    let full = !&wide;
    assert_eq!(full.count_ones(), 67);
    assert!(full.is_subset_of(&full));
    assert!(!full.is_subset_of(&wide));
}

#[test]
fn test_spin_determinant_shifts() {
    let a = sd("00011");
    assert_eq!(&a << 1, sd("00110"));
    assert_eq!(&a << 3, sd("11000"));
    assert_eq!(&a << 4, sd("10000"));
    assert_eq!(&a << 5, sd("00000"));
    assert_eq!(&a << 0, a);
    assert_eq!(sd("11000") >> 3, sd("00011"));
    assert_eq!(sd("11000") >> 9, sd("00000"));

    let wide = SpinDeterminant::from_orbitals(130, [0, 63, 64]);
    assert_eq!((&wide << 64).iter_occupied().collect_vec(), vec![64, 127, 128]);
    assert_eq!((&wide >> 1).iter_occupied().collect_vec(), vec![62, 63]);
}

#[test]
fn test_spin_determinant_set_relations() {
    let a = sd("10000");
    let b = sd("11000");
    let c = sd("00110");
    assert!(a.is_subset_of(&b));
    assert!(!b.is_subset_of(&a));
    assert!(SpinDeterminant::new(5).is_subset_of(&a));
    assert!(a.is_disjoint_from(&c));
    assert!(!b.is_disjoint_from(&a));
    assert!(c.is_subset_of(&!&b));
}

#[test]
#[should_panic]
fn test_spin_determinant_mismatched_lengths() {
    let _ = sd("110").is_subset_of(&sd("1100"));
}

#[test]
fn test_determinant_single_excitation() {
    let s = Determinant::from_strs("11000", "00001").unwrap();
    assert_eq!(
        s.apply_single_excitation(Spin::Alpha, 4, 1),
        Determinant::from_strs("01010", "00001").unwrap()
    );
    assert_eq!(
        s.apply_single_excitation(Spin::Beta, 0, 1),
        Determinant::from_strs("11000", "00010").unwrap()
    );
    assert_eq!(s[Spin::Alpha], sd("11000"));
    assert_eq!(s.to_string(), "(11000,00001)");
}

#[test]
#[should_panic]
fn test_determinant_single_excitation_from_empty_hole() {
    let s = Determinant::from_strs("11000", "00001").unwrap();
    let _ = s.apply_single_excitation(Spin::Beta, 2, 3);
}

#[test]
#[should_panic]
fn test_determinant_single_excitation_into_occupied_particle() {
    let s = Determinant::from_strs("11000", "00001").unwrap();
    let _ = s.apply_single_excitation(Spin::Alpha, 4, 3);
}

#[test]
fn test_determinant_full_ci_space() {
    let psi = Determinant::full_ci_space(4, 2, 1);
    assert_eq!(psi.len(), 6 * 4);
    assert_eq!(psi.iter().unique().count(), psi.len());
    assert!(psi
        .iter()
        .all(|det| det.alpha.count_ones() == 2 && det.beta.count_ones() == 1));
    assert_eq!(psi[0], Determinant::from_strs("0011", "0001").unwrap());
    assert_eq!(psi[1], Determinant::from_strs("0011", "0010").unwrap());
    assert_eq!(psi[4], Determinant::from_strs("0101", "0001").unwrap());
}

#[test]
fn test_spin_opposite() {
    assert_eq!(Spin::Alpha.opposite(), Spin::Beta);
    assert_eq!(Spin::Beta.opposite(), Spin::Alpha);
    assert_eq!(Spin::ALL, [Spin::Alpha, Spin::Beta]);
}
