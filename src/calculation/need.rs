//! Per-beneficiary need at a given bracket

use crate::case::Beneficiary;
use crate::tables::{AgeBand, RateTables};
use serde::Serialize;

/// Need of one beneficiary at one bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeneficiaryNeed {
    pub age_band: AgeBand,
    pub bracket: u8,
    /// Table amount in whole monetary units
    pub table_amount: u32,
    /// Child benefit credited against the table amount
    pub benefit_deduction: f64,
    /// max(0, table amount - deduction), before any shortfall scaling
    pub payable: f64,
}

/// Needs of all beneficiaries at one bracket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNeed {
    pub bracket: u8,
    pub needs: Vec<BeneficiaryNeed>,
    /// Sum of payable amounts
    pub aggregate: f64,
}

impl GroupNeed {
    pub fn payables(&self) -> Vec<f64> {
        self.needs.iter().map(|n| n.payable).collect()
    }
}

/// Table amount for an age band at a bracket.
///
/// ceil(minimum need * percent / 100). Adults with their own household get
/// the flat need regardless of bracket.
pub fn table_amount(tables: &RateTables, bracket: u8, band: AgeBand) -> u32 {
    let base = tables.needs.for_band(band);
    if band == AgeBand::AdultIndependent {
        return base;
    }
    (base * tables.brackets.percent(bracket)).div_ceil(100)
}

/// Child benefit credited for a beneficiary.
///
/// Full benefit for adults and for minors whose benefit goes to the payer,
/// half for minors whose benefit goes to the co-parent.
pub fn benefit_deduction(tables: &RateTables, beneficiary: &Beneficiary) -> f64 {
    if beneficiary.is_minor() && beneficiary.benefit_to_co_parent() {
        tables.child_benefit.half()
    } else {
        tables.child_benefit.monthly
    }
}

pub fn compute_need(tables: &RateTables, beneficiary: &Beneficiary, bracket: u8) -> BeneficiaryNeed {
    let age_band = beneficiary.age_band();
    let table_amount = table_amount(tables, bracket, age_band);
    let benefit_deduction = benefit_deduction(tables, beneficiary);

    BeneficiaryNeed {
        age_band,
        bracket,
        table_amount,
        benefit_deduction,
        payable: (table_amount as f64 - benefit_deduction).max(0.0),
    }
}

pub fn needs_for_bracket(tables: &RateTables, beneficiaries: &[Beneficiary], bracket: u8) -> GroupNeed {
    let needs: Vec<BeneficiaryNeed> = beneficiaries
        .iter()
        .map(|b| compute_need(tables, b, bracket))
        .collect();
    let aggregate = needs.iter().map(|n| n.payable).sum();

    GroupNeed {
        bracket,
        needs,
        aggregate,
    }
}
