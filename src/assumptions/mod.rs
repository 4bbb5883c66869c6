//! Actuarial assumptions: mortality table and CPP benefit rules

mod benefit;
mod mortality;
pub mod loader;

pub use benefit::BenefitAssumptions;
pub use mortality::{effective_age, MortalityTable, TABLE_MAX_AGE, TERMINAL_AGE};

use std::path::Path;

use crate::error::Result;

/// Container for all evaluation assumptions
///
/// Built once and shared read-only by every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Assumptions {
    pub mortality: MortalityTable,
    pub benefit: BenefitAssumptions,
}

impl Assumptions {
    /// Create assumptions from the embedded mortality table
    pub fn default_pricing() -> Self {
        Self {
            mortality: MortalityTable::builtin(),
            benefit: BenefitAssumptions::default(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            mortality: loader::load_mortality_table(path)?,
            benefit: BenefitAssumptions::default(),
        })
    }

    /// Replace the mortality table, keeping the benefit rules
    pub fn with_mortality(mut self, mortality: MortalityTable) -> Self {
        self.mortality = mortality;
        self
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_pricing()
    }
}
