//! Case inputs: beneficiaries, party incomes and supplemental needs

use crate::error::{Result, SupportError};
use crate::tables::{AgeBand, Employment, GuidelinePreset, MAJORITY_AGE};
use serde::{Deserialize, Serialize};

/// A child (or young adult) entitled to support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Beneficiary {
    /// Age in completed years
    age: u32,

    /// Lives in a parent's household. Always true for minors.
    lives_with_parent: bool,

    /// Child benefit is paid to the co-parent (caring parent) rather than the payer
    benefit_to_co_parent: bool,
}

impl Beneficiary {
    /// Validate and build a beneficiary.
    ///
    /// Negative ages are a caller error. Minors are forced to resident.
    pub fn new(age: i64, lives_with_parent: bool, benefit_to_co_parent: bool) -> Result<Self> {
        let age = u32::try_from(age).map_err(|_| SupportError::InvalidAge(age))?;
        Ok(Self {
            age,
            lives_with_parent: lives_with_parent || age < MAJORITY_AGE,
            benefit_to_co_parent,
        })
    }

    /// Beneficiary living with the co-parent, who also receives the child benefit
    pub fn resident(age: u32) -> Self {
        Self {
            age,
            lives_with_parent: true,
            benefit_to_co_parent: true,
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn lives_with_parent(&self) -> bool {
        self.lives_with_parent
    }

    pub fn benefit_to_co_parent(&self) -> bool {
        self.benefit_to_co_parent
    }

    pub fn is_minor(&self) -> bool {
        self.age < MAJORITY_AGE
    }

    pub fn age_band(&self) -> AgeBand {
        AgeBand::for_age(self.age, self.lives_with_parent)
    }

    /// Adult with an own household, which ranks below minors and raises
    /// the payer's protected minimum
    pub fn is_non_privileged_adult(&self) -> bool {
        self.age_band() == AgeBand::AdultIndependent
    }
}

/// A party's income and protected minimum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartyIncome {
    /// Adjusted net income, never negative
    pub net_income: f64,
    pub protected_minimum: f64,
}

impl PartyIncome {
    /// Negative or NaN incomes clamp to zero
    pub fn new(net_income: f64, protected_minimum: f64) -> Self {
        Self {
            net_income: clamp_income(net_income),
            protected_minimum,
        }
    }

    /// Income above the protected minimum (never negative)
    pub fn available(&self) -> f64 {
        (self.net_income - self.protected_minimum).max(0.0)
    }
}

pub(crate) fn clamp_income(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Deductible items between gross and adjusted net income (monthly)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeDeductions {
    /// Mandatory taxes and social security
    pub taxes_and_social_security: f64,
    /// Work-related commuting
    pub commuting: f64,
    /// Work tools, phone, internet (work share)
    pub work_tools: f64,
    /// Work-related training
    pub training: f64,
    /// Double household for work
    pub double_household: f64,
    /// Reasonable additional retirement provision
    pub retirement_provision: f64,
    /// Recognised debts
    pub debts: f64,
    /// Additional health or care insurance
    pub health_insurance: f64,
    pub other: f64,
}

impl IncomeDeductions {
    pub fn total(&self) -> f64 {
        [
            self.taxes_and_social_security,
            self.commuting,
            self.work_tools,
            self.training,
            self.double_household,
            self.retirement_provision,
            self.debts,
            self.health_insurance,
            self.other,
        ]
        .iter()
        .map(|v| clamp_income(*v))
        .sum()
    }
}

/// Gross income plus deductions, for callers that don't have the adjusted net figure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrossIncome {
    pub gross: f64,
    #[serde(default)]
    pub deductions: IncomeDeductions,
}

impl GrossIncome {
    /// Adjusted net income = gross - deductions, clamped at zero
    pub fn net(&self) -> f64 {
        (clamp_income(self.gross) - self.deductions.total()).max(0.0)
    }
}

/// Supplemental needs per month (recurring extra costs and extraordinary items)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementalNeeds {
    /// Daycare, after-school care
    pub daycare: f64,
    /// Health, insurance, co-payments
    pub health: f64,
    /// School, study, materials
    pub schooling: f64,
    /// Contact and travel costs
    pub travel: f64,
    /// Other recognised needs
    pub other: f64,
}

impl SupplementalNeeds {
    /// Single lump figure booked under `other`
    pub fn lump(total: f64) -> Self {
        Self {
            other: total,
            ..Default::default()
        }
    }

    pub fn total(&self) -> f64 {
        [self.daycare, self.health, self.schooling, self.travel, self.other]
            .iter()
            .map(|v| clamp_income(*v))
            .sum()
    }
}

/// Everything one calculation needs, validated and immutable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub payer_net_income: f64,
    pub co_parent_net_income: f64,
    pub payer_employment: Employment,
    pub co_parent_employment: Employment,
    pub beneficiaries: Vec<Beneficiary>,
    pub guideline: GuidelinePreset,
    pub supplemental: SupplementalNeeds,
    /// Try a one-bracket increase when there is exactly one beneficiary
    pub single_beneficiary_increase: bool,
}

impl CalculationRequest {
    /// Request with defaults: no co-parent income, both employed,
    /// Duesseldorf guideline, no supplemental needs, increase enabled
    pub fn new(payer_net_income: f64, beneficiaries: Vec<Beneficiary>) -> Result<Self> {
        if beneficiaries.is_empty() {
            return Err(SupportError::NoBeneficiaries);
        }
        Ok(Self {
            payer_net_income: clamp_income(payer_net_income),
            co_parent_net_income: 0.0,
            payer_employment: Employment::Employed,
            co_parent_employment: Employment::Employed,
            beneficiaries,
            guideline: GuidelinePreset::default(),
            supplemental: SupplementalNeeds::default(),
            single_beneficiary_increase: true,
        })
    }

    pub fn with_co_parent(mut self, net_income: f64, employment: Employment) -> Self {
        self.co_parent_net_income = clamp_income(net_income);
        self.co_parent_employment = employment;
        self
    }

    pub fn with_payer_employment(mut self, employment: Employment) -> Self {
        self.payer_employment = employment;
        self
    }

    pub fn with_guideline(mut self, guideline: GuidelinePreset) -> Self {
        self.guideline = guideline;
        self
    }

    pub fn with_supplemental(mut self, supplemental: SupplementalNeeds) -> Self {
        self.supplemental = supplemental;
        self
    }

    pub fn with_single_beneficiary_increase(mut self, enabled: bool) -> Self {
        self.single_beneficiary_increase = enabled;
        self
    }

    /// True when every beneficiary is an adult with their own household
    pub fn all_non_privileged_adults(&self) -> bool {
        !self.beneficiaries.is_empty() && self.beneficiaries.iter().all(|b| b.is_non_privileged_adult())
    }
}
