//! # IDCI: Integral-Driven Configuration Interaction
//!
//! IDCI generates the Hamiltonian matrix-element contributions of configuration-interaction
//! calculations one two-electron integral at a time. Rather than looping over pairs of
//! determinants and evaluating Slater–Condon rules, each integral label $`(ij|kl)`$ is classified
//! by its index coincidences and then mapped directly onto the determinant pairs it couples:
//! - determinants are stored as pairs of fixed-width occupation bitsets, one per spin channel,
//! - determinants compatible with an integral are found by occupancy and unoccupancy masks,
//! - the fermionic sign of each single excitation is obtained from the parity of the occupied
//!   orbitals it passes over, and
//! - the excited determinant is located in the determinant list by its occupation pattern.
//!
//! Generators are provided for the integral categories A to D, covering every integral that
//! contributes to diagonal elements or to single excitations through a repeated orbital. The
//! remaining categories E, F, and G are classified but reported as unsupported.
//!
//! ## Overview of modules
//!
//! - [`determinant`]: occupation bitsets and spin-resolved determinants.
//! - [`combinatorics`]: binomial coefficients and the lexicographic ranking and unranking of
//!   occupation patterns.
//! - [`phase`]: signs of single excitations.
//! - [`matcher`]: mask queries over determinant lists and determinant lookup.
//! - [`integrals`]: integral labels, their canonical forms, and their categories.
//! - [`contributions`]: the per-category contribution generators.
//! - [`drivers`]: batch processing of many integrals under a set of control parameters.
//! - [`io`]: reading and writing of YAML configuration files.
//!
//! ## Logging
//!
//! Main output is logged at the `info` level to the `idci-output` target, and diagnostic output
//! is logged through the usual `log` targets. No logger is initialised by this crate.
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions.
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod combinatorics;
pub mod contributions;
pub mod determinant;
pub mod drivers;
pub mod integrals;
pub mod io;
pub mod matcher;
pub mod phase;
