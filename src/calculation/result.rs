//! Calculation output consumed by report and export layers

use super::bracket::BracketResolution;
use super::supplemental::SupplementalSplit;
use crate::case::PartyIncome;
use crate::tables::{AgeBand, GuidelinePreset};
use serde::Serialize;

/// Figures for one beneficiary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeneficiaryBreakdown {
    pub age: u32,
    pub age_band: AgeBand,
    pub lives_with_parent: bool,
    pub benefit_to_co_parent: bool,
    /// Table amount at the resolved bracket
    pub table_amount: u32,
    pub benefit_deduction: f64,
    /// Payable before shortfall scaling
    pub pre_scaling: f64,
    /// Final monthly amount
    pub final_amount: f64,
}

/// Complete, immutable result of one calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub guideline: GuidelinePreset,
    pub payer: PartyIncome,
    pub co_parent: PartyIncome,

    /// How the starting bracket was reached
    pub resolution: BracketResolution,

    /// Resolved bracket after the downgrade search
    pub bracket: u8,
    pub percent: u32,
    pub control_threshold: Option<f64>,
    /// Brackets visited by the downgrade search, in order
    pub brackets_tried: Vec<u8>,

    /// Sum of pre-scaling payables at the resolved bracket
    pub aggregate_payable: f64,
    /// Payer income minus aggregate payable
    pub residual_after_payment: f64,

    pub beneficiaries: Vec<BeneficiaryBreakdown>,

    pub shortfall_applied: bool,
    /// 1.0 unless shortfall scaling reduced the amounts
    pub shortfall_factor: f64,

    pub supplemental: SupplementalSplit,
}

/// Headline figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultSummary {
    pub bracket: u8,
    pub beneficiary_count: usize,
    /// Sum of final per-beneficiary amounts
    pub total_regular: f64,
    pub payer_supplemental_share: f64,
    /// Regular support plus the payer's supplemental share
    pub total_monthly: f64,
    pub shortfall_applied: bool,
}

impl CalculationResult {
    pub fn total_regular(&self) -> f64 {
        self.beneficiaries.iter().map(|b| b.final_amount).sum()
    }

    pub fn final_amounts(&self) -> Vec<f64> {
        self.beneficiaries.iter().map(|b| b.final_amount).collect()
    }

    pub fn summary(&self) -> ResultSummary {
        let total_regular = self.total_regular();
        ResultSummary {
            bracket: self.bracket,
            beneficiary_count: self.beneficiaries.len(),
            total_regular,
            payer_supplemental_share: self.supplemental.payer_share,
            total_monthly: total_regular + self.supplemental.payer_share,
            shortfall_applied: self.shortfall_applied,
        }
    }
}
