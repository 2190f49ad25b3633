//! Reference tables: income brackets, minimum needs, guideline presets and
//! protected minimum incomes

mod brackets;
mod guidelines;
mod needs;
mod reserve;
pub mod loader;

pub use brackets::{clamp_bracket, BracketTable, IncomeBracket, MAX_BRACKET, MIN_BRACKET};
pub use guidelines::{GuidelinePreset, GuidelineTable};
pub use loader::LoadedTables;
pub use needs::{AgeBand, ChildBenefit, MinimumNeeds, MAJORITY_AGE};
pub use reserve::{Employment, ProtectedMinimums};

use crate::error::Result;
use std::path::Path;

/// Container for one table edition
///
/// Read-only once built; share it by reference between calculations.
#[derive(Debug, Clone)]
pub struct RateTables {
    pub brackets: BracketTable,
    pub needs: MinimumNeeds,
    pub child_benefit: ChildBenefit,
    pub guidelines: GuidelineTable,
    pub protected_minimums: ProtectedMinimums,
}

impl RateTables {
    /// Built-in 2025 edition
    pub fn edition_2025() -> Self {
        Self {
            brackets: BracketTable::edition_2025(),
            needs: MinimumNeeds::edition_2025(),
            child_benefit: ChildBenefit::edition_2025(),
            guidelines: GuidelineTable::edition_2025(),
            protected_minimums: ProtectedMinimums::edition_2025(),
        }
    }

    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedTables::load_from(path)?;
        let child_benefit = ChildBenefit {
            monthly: loaded.amount("child_benefit")?,
        };
        let protected_minimums = ProtectedMinimums {
            employed: loaded.amount("reserve_employed")?,
            unemployed: loaded.amount("reserve_unemployed")?,
            adult_non_privileged: loaded.amount("reserve_adult")?,
        };

        Ok(Self {
            brackets: BracketTable::from_rows(loaded.income_brackets),
            needs: loaded.minimum_needs,
            child_benefit,
            guidelines: GuidelineTable::from_map(loaded.guideline_presets),
            protected_minimums,
        })
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::edition_2025()
    }
}
