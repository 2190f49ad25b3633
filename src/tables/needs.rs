//! Minimum need by age band and the periodic child benefit

use serde::{Deserialize, Serialize};
use std::fmt;

/// Age of majority
pub const MAJORITY_AGE: u32 = 18;

/// Age band used to select the minimum need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    /// 0-5
    EarlyChildhood,
    /// 6-11
    MidChildhood,
    /// 12-17
    Adolescence,
    /// 18+ living in a parent's household
    AdultResident,
    /// 18+ with their own household
    AdultIndependent,
}

impl AgeBand {
    /// Select the band for an age and residence flag.
    /// Residence only matters at/after majority.
    pub fn for_age(age: u32, lives_with_parent: bool) -> Self {
        match age {
            0..=5 => AgeBand::EarlyChildhood,
            6..=11 => AgeBand::MidChildhood,
            12..=17 => AgeBand::Adolescence,
            _ if lives_with_parent => AgeBand::AdultResident,
            _ => AgeBand::AdultIndependent,
        }
    }

    /// Key used in minimum_needs.csv
    pub fn key(&self) -> &'static str {
        match self {
            AgeBand::EarlyChildhood => "0-5",
            AgeBand::MidChildhood => "6-11",
            AgeBand::Adolescence => "12-17",
            AgeBand::AdultResident => "18+",
            AgeBand::AdultIndependent => "18+ independent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "0-5" => Some(AgeBand::EarlyChildhood),
            "6-11" => Some(AgeBand::MidChildhood),
            "12-17" => Some(AgeBand::Adolescence),
            "18+" => Some(AgeBand::AdultResident),
            "18+ independent" => Some(AgeBand::AdultIndependent),
            _ => None,
        }
    }

    pub const ALL: [AgeBand; 5] = [
        AgeBand::EarlyChildhood,
        AgeBand::MidChildhood,
        AgeBand::Adolescence,
        AgeBand::AdultResident,
        AgeBand::AdultIndependent,
    ];
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeBand::AdultResident => f.write_str("18+ (with parent)"),
            AgeBand::AdultIndependent => f.write_str("18+ (own household)"),
            other => f.write_str(other.key()),
        }
    }
}

/// Minimum need in whole monetary units per age band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumNeeds {
    pub early_childhood: u32,
    pub mid_childhood: u32,
    pub adolescence: u32,
    pub adult_resident: u32,
    /// Flat need for an adult with their own household; not scaled by bracket
    pub adult_independent: u32,
}

impl MinimumNeeds {
    pub fn edition_2025() -> Self {
        Self {
            early_childhood: 482,
            mid_childhood: 554,
            adolescence: 649,
            adult_resident: 693,
            adult_independent: 990,
        }
    }

    pub fn for_band(&self, band: AgeBand) -> u32 {
        match band {
            AgeBand::EarlyChildhood => self.early_childhood,
            AgeBand::MidChildhood => self.mid_childhood,
            AgeBand::Adolescence => self.adolescence,
            AgeBand::AdultResident => self.adult_resident,
            AgeBand::AdultIndependent => self.adult_independent,
        }
    }

    pub(crate) fn set_band(&mut self, band: AgeBand, amount: u32) {
        match band {
            AgeBand::EarlyChildhood => self.early_childhood = amount,
            AgeBand::MidChildhood => self.mid_childhood = amount,
            AgeBand::Adolescence => self.adolescence = amount,
            AgeBand::AdultResident => self.adult_resident = amount,
            AgeBand::AdultIndependent => self.adult_independent = amount,
        }
    }
}

/// Periodic child benefit credited against the table amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChildBenefit {
    /// Full monthly amount
    pub monthly: f64,
}

impl ChildBenefit {
    pub fn edition_2025() -> Self {
        Self { monthly: 255.0 }
    }

    pub fn half(&self) -> f64 {
        self.monthly / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bands() {
        assert_eq!(AgeBand::for_age(0, true), AgeBand::EarlyChildhood);
        assert_eq!(AgeBand::for_age(5, true), AgeBand::EarlyChildhood);
        assert_eq!(AgeBand::for_age(6, true), AgeBand::MidChildhood);
        assert_eq!(AgeBand::for_age(11, true), AgeBand::MidChildhood);
        assert_eq!(AgeBand::for_age(12, true), AgeBand::Adolescence);
        assert_eq!(AgeBand::for_age(17, false), AgeBand::Adolescence);
        assert_eq!(AgeBand::for_age(18, true), AgeBand::AdultResident);
        assert_eq!(AgeBand::for_age(18, false), AgeBand::AdultIndependent);
        assert_eq!(AgeBand::for_age(27, false), AgeBand::AdultIndependent);
    }

    #[test]
    fn test_band_keys_round_trip() {
        for band in AgeBand::ALL {
            assert_eq!(AgeBand::from_key(band.key()), Some(band));
        }
        assert_eq!(AgeBand::from_key("adult"), None);
    }

    #[test]
    fn test_minimum_needs_2025() {
        let needs = MinimumNeeds::edition_2025();

        assert_eq!(needs.for_band(AgeBand::EarlyChildhood), 482);
        assert_eq!(needs.for_band(AgeBand::MidChildhood), 554);
        assert_eq!(needs.for_band(AgeBand::Adolescence), 649);
        assert_eq!(needs.for_band(AgeBand::AdultResident), 693);
        assert_eq!(needs.for_band(AgeBand::AdultIndependent), 990);
    }

    #[test]
    fn test_child_benefit_half() {
        let benefit = ChildBenefit::edition_2025();
        assert_eq!(benefit.half(), 127.5);
    }
}
