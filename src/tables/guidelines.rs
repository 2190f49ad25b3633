//! Regional guideline presets: bracket step-downs for several beneficiaries

use crate::error::SupportError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Guideline preset identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GuidelinePreset {
    /// Higher regional court Duesseldorf (NRW)
    #[default]
    Duesseldorf,
    /// Higher regional court Frankfurt/Main
    Frankfurt,
    /// Higher regional court Dresden
    Dresden,
}

impl GuidelinePreset {
    pub const ALL: [GuidelinePreset; 3] = [
        GuidelinePreset::Duesseldorf,
        GuidelinePreset::Frankfurt,
        GuidelinePreset::Dresden,
    ];

    pub const NAMES: &'static [&'static str] = &["NRW (OLG Düsseldorf)", "Frankfurt/Main", "Dresden"];

    /// Display name as printed on the guideline
    pub fn name(&self) -> &'static str {
        match self {
            GuidelinePreset::Duesseldorf => Self::NAMES[0],
            GuidelinePreset::Frankfurt => Self::NAMES[1],
            GuidelinePreset::Dresden => Self::NAMES[2],
        }
    }
}

impl fmt::Display for GuidelinePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GuidelinePreset {
    type Err = SupportError;

    /// Accepts the display name or a short slug (`nrw`, `duesseldorf`,
    /// `frankfurt`, `dresden`), case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some(preset) = Self::ALL.iter().find(|p| p.name() == raw) {
            return Ok(*preset);
        }
        match raw.to_ascii_lowercase().as_str() {
            "nrw" | "duesseldorf" | "dusseldorf" | "olg-duesseldorf" => Ok(GuidelinePreset::Duesseldorf),
            "frankfurt" | "frankfurt/main" | "frankfurt-main" => Ok(GuidelinePreset::Frankfurt),
            "dresden" => Ok(GuidelinePreset::Dresden),
            _ => Err(SupportError::UnknownGuideline {
                raw: raw.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Step-down counts per preset, keyed by number of equal-rank beneficiaries
#[derive(Debug, Clone)]
pub struct GuidelineTable {
    step_downs: HashMap<GuidelinePreset, BTreeMap<u32, u32>>,
}

impl GuidelineTable {
    pub(crate) fn from_map(step_downs: HashMap<GuidelinePreset, BTreeMap<u32, u32>>) -> Self {
        Self { step_downs }
    }

    /// 2025 presets: no step-down for 1-2 beneficiaries, one for 3, two for 4+
    pub fn edition_2025() -> Self {
        let standard: BTreeMap<u32, u32> = [(1, 0), (2, 0), (3, 1), (4, 2)].into_iter().collect();
        let step_downs = GuidelinePreset::ALL
            .iter()
            .map(|&preset| (preset, standard.clone()))
            .collect();
        Self { step_downs }
    }

    /// Number of brackets to step down for the given beneficiary count.
    /// The count is clamped to the preset's defined key range.
    pub fn step_down(&self, preset: GuidelinePreset, beneficiaries: usize) -> u32 {
        let Some(map) = self.step_downs.get(&preset) else {
            return 0;
        };
        let max_key = map.keys().next_back().copied().unwrap_or(1);
        let key = (beneficiaries as u32).clamp(1, max_key.max(1));
        map.get(&key).copied().unwrap_or(0)
    }

    pub fn contains(&self, preset: GuidelinePreset) -> bool {
        self.step_downs.contains_key(&preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_downs_2025() {
        let table = GuidelineTable::edition_2025();

        for preset in GuidelinePreset::ALL {
            assert_eq!(table.step_down(preset, 0), 0);
            assert_eq!(table.step_down(preset, 1), 0);
            assert_eq!(table.step_down(preset, 2), 0);
            assert_eq!(table.step_down(preset, 3), 1);
            assert_eq!(table.step_down(preset, 4), 2);
            // Clamped to the highest defined count
            assert_eq!(table.step_down(preset, 9), 2);
        }
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("NRW (OLG Düsseldorf)".parse::<GuidelinePreset>().unwrap(), GuidelinePreset::Duesseldorf);
        assert_eq!("nrw".parse::<GuidelinePreset>().unwrap(), GuidelinePreset::Duesseldorf);
        assert_eq!("Frankfurt/Main".parse::<GuidelinePreset>().unwrap(), GuidelinePreset::Frankfurt);
        assert_eq!(" DRESDEN ".parse::<GuidelinePreset>().unwrap(), GuidelinePreset::Dresden);
    }

    #[test]
    fn test_default_preset_is_nrw() {
        assert_eq!(GuidelinePreset::default(), GuidelinePreset::Duesseldorf);
        assert_eq!(GuidelinePreset::default().to_string(), "NRW (OLG Düsseldorf)");
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let err = "Hamm".parse::<GuidelinePreset>().unwrap_err();
        assert!(matches!(err, SupportError::UnknownGuideline { ref raw, .. } if raw == "Hamm"));
        assert!(err.to_string().contains("Dresden"));
    }

    #[test]
    fn test_missing_preset_has_no_step_down() {
        let table = GuidelineTable::from_map(HashMap::new());
        assert_eq!(table.step_down(GuidelinePreset::Dresden, 4), 0);
    }
}
