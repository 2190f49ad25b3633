//! CSV-based rate table loader
//!
//! Loads a table edition from CSV files in data/tables/

use super::brackets::{IncomeBracket, MAX_BRACKET, MIN_BRACKET};
use super::guidelines::GuidelinePreset;
use super::needs::{AgeBand, MinimumNeeds};
use crate::error::{Result, SupportError};
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;

/// Default path to the table directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

#[derive(Debug, Deserialize)]
struct BracketRow {
    bracket: u8,
    lower: f64,
    upper: f64,
    percent: u32,
    // Empty cell for bracket 1
    control_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NeedRow {
    band: String,
    amount: u32,
}

#[derive(Debug, Deserialize)]
struct GuidelineRow {
    preset: String,
    beneficiaries: u32,
    step_down: u32,
}

#[derive(Debug, Deserialize)]
struct AmountRow {
    key: String,
    amount: f64,
}

fn reader(path: &Path, file: &str) -> Result<csv::Reader<File>> {
    let full = path.join(file);
    debug!("loading {}", full.display());
    Ok(csv::Reader::from_reader(File::open(full)?))
}

/// Load income brackets from income_brackets.csv
///
/// Requires exactly one row per bracket 1..=15 with ascending ranges.
pub fn load_income_brackets(path: &Path) -> Result<Vec<IncomeBracket>> {
    let mut rdr = reader(path, "income_brackets.csv")?;
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let row: BracketRow = result?;
        if !(MIN_BRACKET..=MAX_BRACKET).contains(&row.bracket) {
            return Err(SupportError::InvalidTable(format!("bracket {} out of range", row.bracket)));
        }
        rows.push(IncomeBracket {
            index: row.bracket,
            lower: row.lower,
            upper: row.upper,
            percent: row.percent,
            control_threshold: row.control_threshold,
        });
    }

    rows.sort_by_key(|r| r.index);
    let indices: Vec<u8> = rows.iter().map(|r| r.index).collect();
    let expected: Vec<u8> = (MIN_BRACKET..=MAX_BRACKET).collect();
    if indices != expected {
        return Err(SupportError::InvalidTable(format!(
            "expected brackets {}..={}, found {:?}",
            MIN_BRACKET, MAX_BRACKET, indices
        )));
    }
    if let Some(row) = rows.iter().find(|r| r.lower > r.upper) {
        return Err(SupportError::InvalidTable(format!(
            "income range of bracket {} is inverted",
            row.index
        )));
    }
    for pair in rows.windows(2) {
        if pair[1].lower <= pair[0].upper {
            return Err(SupportError::InvalidTable(format!(
                "income ranges of brackets {} and {} overlap",
                pair[0].index, pair[1].index
            )));
        }
    }

    Ok(rows)
}

/// Load minimum needs from minimum_needs.csv (band,amount)
pub fn load_minimum_needs(path: &Path) -> Result<MinimumNeeds> {
    let mut rdr = reader(path, "minimum_needs.csv")?;
    let mut found: HashMap<AgeBand, u32> = HashMap::new();

    for result in rdr.deserialize() {
        let row: NeedRow = result?;
        let band = AgeBand::from_key(&row.band)
            .ok_or_else(|| SupportError::InvalidTable(format!("unknown age band '{}'", row.band)))?;
        found.insert(band, row.amount);
    }

    let mut needs = MinimumNeeds::edition_2025();
    for band in AgeBand::ALL {
        let amount = found
            .get(&band)
            .ok_or_else(|| SupportError::InvalidTable(format!("missing age band '{}'", band.key())))?;
        needs.set_band(band, *amount);
    }

    Ok(needs)
}

/// Load guideline step-downs from guideline_presets.csv
/// Returns preset -> (beneficiary count -> step-down)
pub fn load_guideline_presets(path: &Path) -> Result<HashMap<GuidelinePreset, BTreeMap<u32, u32>>> {
    let mut rdr = reader(path, "guideline_presets.csv")?;
    let mut presets: HashMap<GuidelinePreset, BTreeMap<u32, u32>> = HashMap::new();

    for result in rdr.deserialize() {
        let row: GuidelineRow = result?;
        let preset: GuidelinePreset = row.preset.parse()?;
        presets.entry(preset).or_default().insert(row.beneficiaries, row.step_down);
    }

    if presets.is_empty() {
        return Err(SupportError::InvalidTable("no guideline presets defined".to_string()));
    }

    Ok(presets)
}

/// Load scalar policy amounts from policy_amounts.csv (key,amount)
pub fn load_policy_amounts(path: &Path) -> Result<HashMap<String, f64>> {
    let mut rdr = reader(path, "policy_amounts.csv")?;
    let mut amounts = HashMap::new();

    for result in rdr.deserialize() {
        let row: AmountRow = result?;
        amounts.insert(row.key.trim().to_string(), row.amount);
    }

    Ok(amounts)
}

/// All table files of one edition
pub struct LoadedTables {
    pub income_brackets: Vec<IncomeBracket>,
    pub minimum_needs: MinimumNeeds,
    pub guideline_presets: HashMap<GuidelinePreset, BTreeMap<u32, u32>>,
    pub policy_amounts: HashMap<String, f64>,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            income_brackets: load_income_brackets(path)?,
            minimum_needs: load_minimum_needs(path)?,
            guideline_presets: load_guideline_presets(path)?,
            policy_amounts: load_policy_amounts(path)?,
        })
    }

    /// Look up a required policy amount
    pub fn amount(&self, key: &str) -> Result<f64> {
        self.policy_amounts
            .get(key)
            .copied()
            .ok_or_else(|| SupportError::InvalidTable(format!("missing policy amount '{}'", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("support_engine_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_default_tables() {
        let result = LoadedTables::load_default();
        assert!(result.is_ok(), "Failed to load tables: {:?}", result.err());

        let tables = result.unwrap();

        assert_eq!(tables.income_brackets.len(), 15);
        assert_eq!(tables.income_brackets[0].control_threshold, None);
        assert_eq!(tables.income_brackets[4].percent, 120);
        assert_eq!(tables.income_brackets[14].upper, 11200.0);

        assert_eq!(tables.minimum_needs, MinimumNeeds::edition_2025());
        assert_eq!(tables.guideline_presets.len(), 3);
        assert_eq!(tables.amount("child_benefit").unwrap(), 255.0);
        assert_eq!(tables.amount("reserve_adult").unwrap(), 1750.0);
    }

    #[test]
    fn test_missing_bracket_is_rejected() {
        let dir = scratch_dir("missing_bracket");
        fs::write(
            dir.join("income_brackets.csv"),
            "bracket,lower,upper,percent,control_threshold\n1,0,2100,100,\n2,2101,2500,105,1750\n",
        )
        .unwrap();

        let err = load_income_brackets(&dir).unwrap_err();
        assert!(matches!(err, SupportError::InvalidTable(_)));
    }

    #[test]
    fn test_inverted_top_bracket_is_rejected() {
        let dir = scratch_dir("inverted_top");
        let mut csv = fs::read_to_string(Path::new(DEFAULT_TABLES_PATH).join("income_brackets.csv")).unwrap();
        csv = csv.replace("15,9701,11200,", "15,9701,9000,");
        fs::write(dir.join("income_brackets.csv"), csv).unwrap();

        let err = load_income_brackets(&dir).unwrap_err();
        assert!(err.to_string().contains("bracket 15"), "{}", err);
    }

    #[test]
    fn test_unknown_band_is_rejected() {
        let dir = scratch_dir("unknown_band");
        fs::write(dir.join("minimum_needs.csv"), "band,amount\n0-5,482\nteen,600\n").unwrap();

        let err = load_minimum_needs(&dir).unwrap_err();
        assert!(err.to_string().contains("teen"));
    }

    #[test]
    fn test_unknown_preset_in_file_is_rejected() {
        let dir = scratch_dir("unknown_preset");
        fs::write(dir.join("guideline_presets.csv"), "preset,beneficiaries,step_down\nCelle,1,0\n").unwrap();

        let err = load_guideline_presets(&dir).unwrap_err();
        assert!(matches!(err, SupportError::UnknownGuideline { .. }));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = LoadedTables::load_from(Path::new("does/not/exist")).err().unwrap();
        assert!(matches!(err, SupportError::Io(_)));
    }
}
