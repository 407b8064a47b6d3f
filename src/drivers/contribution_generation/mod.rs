//! Driver for generating the Hamiltonian contributions of a batch of two-electron integrals.

use std::fmt;

use anyhow::{self, format_err};
use derive_builder::Builder;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::contributions::{
    validate_psi, ContributionError, ContributionGenerator, HContribution,
};
use crate::determinant::Determinant;
use crate::drivers::IdciDriver;
use crate::integrals::{EriIndex, IntegralCategory};
use crate::io::format::{
    idci_output, idci_warn, log_subtitle, log_title, nice_bool, write_subtitle, IdciOutput,
};
use crate::matcher::DeterminantLookup;


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

const fn default_true() -> bool {
    true
}

/// An enumerated type for the ways excited determinants are located in the determinant list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupStrategy {
    /// Scans the determinant list for every excited determinant.
    Linear,

    /// Indexes the determinant list once by occupation pattern.
    #[default]
    Hashed,
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupStrategy::Linear => write!(f, "linear scan"),
            LookupStrategy::Hashed => write!(f, "hashed index"),
        }
    }
}

/// An enumerated type for the handling of integrals in categories without a generator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnsupportedCategoryPolicy {
    /// Aborts the batch at the first unsupported integral.
    #[default]
    Error,

    /// Records unsupported integrals in the result and carries on with the rest of the batch.
    Report,
}

impl fmt::Display for UnsupportedCategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedCategoryPolicy::Error => write!(f, "abort"),
            UnsupportedCategoryPolicy::Report => write!(f, "report and skip"),
        }
    }
}

/// A structure containing control parameters for contribution generation.
#[derive(Clone, Builder, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionGenerationParams {
    /// The way excited determinants are located in the determinant list.
    #[builder(default = "LookupStrategy::Hashed")]
    #[serde(default)]
    pub lookup: LookupStrategy,

    /// Boolean indicating if input integral labels are to be replaced by their canonical
    /// equivalents before classification. If `false`, non-canonical labels are rejected.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub canonicalise: bool,

    /// The handling of integrals in categories E, F, and G.
    #[builder(default = "UnsupportedCategoryPolicy::Error")]
    #[serde(default)]
    pub unsupported: UnsupportedCategoryPolicy,

    /// Boolean indicating if integrals are to be processed in parallel.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Boolean indicating if every generated contribution is to be written to the output.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_contributions: bool,
}

impl ContributionGenerationParams {
    /// Returns a builder to construct a [`ContributionGenerationParams`] structure.
    pub fn builder() -> ContributionGenerationParamsBuilder {
        ContributionGenerationParamsBuilder::default()
    }
}

impl Default for ContributionGenerationParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `ContributionGenerationParams`.")
    }
}

impl fmt::Display for ContributionGenerationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Determinant lookup: {}", self.lookup)?;
        writeln!(f, "Canonicalise integral labels: {}", nice_bool(self.canonicalise))?;
        writeln!(f, "Unsupported integral categories: {}", self.unsupported)?;
        writeln!(f, "Parallel generation: {}", nice_bool(self.parallel))?;
        writeln!(
            f,
            "Write out individual contributions: {}",
            nice_bool(self.write_contributions)
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure to contain the contributions generated for a single integral.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegralContributions {
    /// The canonical label of the integral.
    pub index: EriIndex,

    /// The category of the integral.
    pub category: IntegralCategory,

    /// The contributions of the integral, in generation order.
    pub contributions: Vec<HContribution>,
}

/// A structure to contain contribution generation results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct ContributionGenerationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: ContributionGenerationParams,

    /// The number of orbitals in each spin channel.
    pub n_orb: usize,

    /// The number of determinants in the configuration-interaction space.
    pub n_determinants: usize,

    /// The contributions of every supported integral, in input order.
    pub contributions: Vec<IntegralContributions>,

    /// The integrals skipped for belonging to unsupported categories, in input order. This is
    /// only populated under [`UnsupportedCategoryPolicy::Report`].
    #[builder(default = "vec![]")]
    pub unsupported: Vec<(EriIndex, IntegralCategory)>,

    /// The number of processed integrals in each category.
    pub category_counts: IndexMap<IntegralCategory, usize>,
}

impl ContributionGenerationResult {
    /// Returns a builder to construct a [`ContributionGenerationResult`] structure.
    fn builder() -> ContributionGenerationResultBuilder {
        ContributionGenerationResultBuilder::default()
    }

    /// The total number of contributions over all integrals.
    pub fn n_contributions(&self) -> usize {
        self.contributions
            .iter()
            .map(|integral| integral.contributions.len())
            .sum()
    }

    /// Returns the contributions generated for the integral with canonical label `index`, if
    /// any.
    pub fn contributions_of(&self, index: &EriIndex) -> Option<&IntegralContributions> {
        self.contributions
            .iter()
            .find(|integral| integral.index == *index)
    }

    fn write_contributions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Contributions by integral")?;
        writeln!(f)?;
        for integral in self.contributions.iter() {
            writeln!(
                f,
                "Integral {} [{}]: {} contribution{}",
                integral.index,
                integral.category,
                integral.contributions.len(),
                if integral.contributions.len() == 1 {
                    ""
                } else {
                    "s"
                }
            )?;
            for contribution in integral.contributions.iter() {
                writeln!(f, "  {contribution}")?;
            }
        }
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for ContributionGenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Contribution summary")?;
        writeln!(f)?;
        writeln!(f, "Number of orbitals: {}", self.n_orb)?;
        writeln!(f, "Number of determinants: {}", self.n_determinants)?;
        writeln!(f)?;

        let mut n_contributions = IndexMap::<IntegralCategory, usize>::new();
        for integral in self.contributions.iter() {
            *n_contributions.entry(integral.category).or_default() += integral.contributions.len();
        }

        writeln!(f, "{}", "┈".repeat(46))?;
        writeln!(
            f,
            " {:<8}  {:>9}  {:>9}  {:>13}",
            "Category", "Supported", "Integrals", "Contributions"
        )?;
        writeln!(f, "{}", "┈".repeat(46))?;
        for (category, n_integrals) in self.category_counts.iter() {
            let n_category_contributions = if category.is_supported() {
                n_contributions
                    .get(category)
                    .copied()
                    .unwrap_or(0)
                    .to_string()
            } else {
                "--".to_string()
            };
            writeln!(
                f,
                " {:<8}  {:>9}  {:>9}  {:>13}",
                category.to_string(),
                nice_bool(category.is_supported()),
                n_integrals,
                n_category_contributions
            )?;
        }
        writeln!(f, "{}", "┈".repeat(46))?;
        writeln!(
            f,
            " {:<8}  {:>9}  {:>9}  {:>13}",
            "Total",
            "",
            self.category_counts.values().sum::<usize>(),
            self.n_contributions()
        )?;
        writeln!(f, "{}", "┈".repeat(46))?;
        writeln!(f)?;

        if !self.unsupported.is_empty() {
            writeln!(f, "Skipped integrals in unsupported categories:")?;
            for (index, category) in self.unsupported.iter() {
                writeln!(f, "  {index} [{category}]")?;
            }
            writeln!(f)?;
        }

        if self.parameters.write_contributions {
            self.write_contributions(f)?;
        }

        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for generating the contributions of a batch of integrals over a fixed list of
/// determinants.
///
/// The determinant lookup is built once and shared by all integrals in the batch.
#[derive(Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ContributionGenerationDriver<'a> {
    /// The control parameters for contribution generation.
    parameters: &'a ContributionGenerationParams,

    /// The number of orbitals in each spin channel.
    n_orb: usize,

    /// The determinants spanning the configuration-interaction space.
    psi: &'a [Determinant],

    /// The labels of the integrals whose contributions are to be generated.
    integrals: &'a [EriIndex],

    /// The result of contribution generation.
    #[builder(setter(skip), default = "None")]
    result: Option<ContributionGenerationResult>,
}

impl<'a> ContributionGenerationDriverBuilder<'a> {
    fn validate(&self) -> Result<(), String> {
        let n_orb = self.n_orb.ok_or("No number of orbitals found.".to_string())?;
        let psi = self.psi.ok_or("No determinants found.".to_string())?;
        validate_psi(n_orb, psi).map_err(|err| err.to_string())
    }
}

impl<'a> ContributionGenerationDriver<'a> {
    /// Returns a builder to construct a [`ContributionGenerationDriver`] structure.
    pub fn builder() -> ContributionGenerationDriverBuilder<'a> {
        ContributionGenerationDriverBuilder::default()
    }

    /// Generates the contributions of a single integral, canonicalising its label first if
    /// requested.
    fn generate_one<L>(
        &self,
        generator: &ContributionGenerator<'a, L>,
        index: &EriIndex,
    ) -> Result<IntegralContributions, ContributionError>
    where
        L: DeterminantLookup,
    {
        let index = if self.parameters.canonicalise {
            index.canonical()
        } else {
            *index
        };
        let contributions = generator.contributions(&index)?;
        Ok(IntegralContributions {
            index,
            category: index.category(),
            contributions,
        })
    }

    fn generate_all<L>(
        &self,
        generator: &ContributionGenerator<'a, L>,
    ) -> Result<ContributionGenerationResult, anyhow::Error>
    where
        L: DeterminantLookup + Sync,
    {
        let params = self.parameters;
        let outcomes = if params.parallel {
            self.integrals
                .par_iter()
                .map(|index| self.generate_one(generator, index))
                .collect::<Vec<_>>()
        } else {
            self.integrals
                .iter()
                .map(|index| self.generate_one(generator, index))
                .collect::<Vec<_>>()
        };

        let mut category_counts = IntegralCategory::ALL
            .iter()
            .map(|category| (*category, 0))
            .collect::<IndexMap<_, usize>>();
        let mut contributions = Vec::with_capacity(outcomes.len());
        let mut unsupported = vec![];
        for outcome in outcomes {
            match outcome {
                Ok(integral) => {
                    *category_counts.entry(integral.category).or_default() += 1;
                    contributions.push(integral);
                }
                Err(ContributionError::UnsupportedCategory { index, category })
                    if params.unsupported == UnsupportedCategoryPolicy::Report =>
                {
                    idci_warn!(
                        "Integral {index} belongs to category {category}, which is not supported. This integral has been skipped."
                    );
                    *category_counts.entry(category).or_default() += 1;
                    unsupported.push((index, category));
                }
                Err(err) => return Err(err.into()),
            }
        }

        ContributionGenerationResult::builder()
            .parameters(params.clone())
            .n_orb(generator.n_orb())
            .n_determinants(generator.psi().len())
            .contributions(contributions)
            .unsupported(unsupported)
            .category_counts(category_counts)
            .build()
            .map_err(|err| format_err!(err))
    }

    /// Executes contribution generation for all integrals.
    fn generate_contributions(&mut self) -> Result<(), anyhow::Error> {
        log_title("Integral-Driven Contribution Generation");
        idci_output!("");
        let params = self.parameters;
        params.log_output_display();

        log_subtitle("Configuration-interaction space");
        idci_output!("");
        idci_output!("Number of orbitals: {}", self.n_orb);
        idci_output!("Number of determinants: {}", self.psi.len());
        idci_output!("Number of integrals: {}", self.integrals.len());
        idci_output!("");

        let result = match params.lookup {
            LookupStrategy::Linear => {
                let generator = ContributionGenerator::linear(self.n_orb, self.psi)?;
                self.generate_all(&generator)?
            }
            LookupStrategy::Hashed => {
                let generator = ContributionGenerator::hashed(self.n_orb, self.psi)?;
                self.generate_all(&generator)?
            }
        };
        result.log_output_display();
        self.result = Some(result);
        Ok(())
    }
}

impl IdciDriver for ContributionGenerationDriver<'_> {
    type Params = ContributionGenerationParams;

    type Outcome = ContributionGenerationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No contribution generation results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.generate_contributions()
    }
}
