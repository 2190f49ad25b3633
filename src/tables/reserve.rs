//! Protected minimum income (retained income) tiers

use serde::{Deserialize, Serialize};

/// Employment status of a party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Employment {
    #[default]
    Employed,
    Unemployed,
}

impl Employment {
    pub fn from_flag(employed: bool) -> Self {
        if employed {
            Employment::Employed
        } else {
            Employment::Unemployed
        }
    }
}

/// Fixed protected-minimum amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectedMinimums {
    /// Employed party
    pub employed: f64,
    /// Party without employment income
    pub unemployed: f64,
    /// Payer whose beneficiaries are all adults with their own household
    pub adult_non_privileged: f64,
}

impl ProtectedMinimums {
    pub fn edition_2025() -> Self {
        Self {
            employed: 1450.0,
            unemployed: 1200.0,
            adult_non_privileged: 1750.0,
        }
    }

    /// Tier for a party by employment only (co-parent)
    pub fn for_employment(&self, employment: Employment) -> f64 {
        match employment {
            Employment::Employed => self.employed,
            Employment::Unemployed => self.unemployed,
        }
    }

    /// Tier for the payer.
    ///
    /// The higher adult tier applies only when every beneficiary is a
    /// non-privileged adult (18+ with their own household).
    pub fn for_payer(&self, employment: Employment, all_non_privileged_adults: bool) -> f64 {
        if all_non_privileged_adults {
            self.adult_non_privileged
        } else {
            self.for_employment(employment)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        let pm = ProtectedMinimums::edition_2025();

        assert_eq!(pm.for_employment(Employment::Employed), 1450.0);
        assert_eq!(pm.for_employment(Employment::Unemployed), 1200.0);
        assert_eq!(pm.for_payer(Employment::Unemployed, false), 1200.0);
        assert_eq!(pm.for_payer(Employment::Employed, true), 1750.0);
        assert_eq!(pm.for_payer(Employment::Unemployed, true), 1750.0);
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(Employment::from_flag(true), Employment::Employed);
        assert_eq!(Employment::from_flag(false), Employment::Unemployed);
    }
}
