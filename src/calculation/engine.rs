//! Support engine: runs the full resolution pipeline for one request

use super::bracket::resolve_start;
use super::downgrade::downgrade_search;
use super::result::{BeneficiaryBreakdown, CalculationResult};
use super::shortfall::scale_to_protected_minimum;
use super::supplemental::allocate;
use crate::case::{CalculationRequest, PartyIncome};
use crate::error::{Result, SupportError};
use crate::tables::{GuidelinePreset, RateTables, MIN_BRACKET};
use log::{debug, info, warn};

/// Main support engine
///
/// Holds one read-only table edition. `calculate` has no side effects, so a
/// single engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct SupportEngine {
    tables: RateTables,
}

impl SupportEngine {
    pub fn new(tables: RateTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Run the pipeline:
    /// base bracket -> guideline step-down -> optional increase ->
    /// downgrade search -> optional shortfall scaling, plus the supplemental split
    pub fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        let tables = &self.tables;
        let beneficiaries = &request.beneficiaries;

        if beneficiaries.is_empty() {
            return Err(SupportError::NoBeneficiaries);
        }
        if !tables.guidelines.contains(request.guideline) {
            return Err(SupportError::UnknownGuideline {
                raw: request.guideline.name().to_string(),
                expected: GuidelinePreset::NAMES,
            });
        }
        if request.payer_net_income < 0.0 || request.co_parent_net_income < 0.0 {
            warn!("negative income clamped to zero");
        }

        let pm = &tables.protected_minimums;
        let payer = PartyIncome::new(
            request.payer_net_income,
            pm.for_payer(request.payer_employment, request.all_non_privileged_adults()),
        );
        let co_parent = PartyIncome::new(
            request.co_parent_net_income,
            pm.for_employment(request.co_parent_employment),
        );

        // Start bracket
        let resolution = resolve_start(
            tables,
            payer.net_income,
            request.guideline,
            beneficiaries,
            request.single_beneficiary_increase,
        );
        debug!(
            "base bracket {} -> guideline {} (step-down {}) -> start {}",
            resolution.base, resolution.guideline_adjusted, resolution.step_down, resolution.start
        );

        // Needs-control search
        let search = downgrade_search(tables, payer.net_income, resolution.start, beneficiaries);
        let pre_amounts = search.group.payables();

        // Shortfall only applies once the search has bottomed out
        let shortfall = if search.bracket == MIN_BRACKET && search.residual < payer.protected_minimum {
            let outcome = scale_to_protected_minimum(payer.net_income, payer.protected_minimum, &pre_amounts);
            debug!("shortfall check: allowed {:.2}, factor {:.6}", outcome.allowed, outcome.factor);
            Some(outcome)
        } else {
            None
        };
        let (final_amounts, shortfall_factor, shortfall_applied) = match shortfall {
            Some(outcome) => {
                let applied = outcome.applied();
                (outcome.amounts, outcome.factor, applied)
            }
            None => (pre_amounts, 1.0, false),
        };

        let supplemental = allocate(request.supplemental.total(), &payer, &co_parent);

        let breakdown = beneficiaries
            .iter()
            .zip(&search.group.needs)
            .zip(final_amounts)
            .map(|((b, need), final_amount)| BeneficiaryBreakdown {
                age: b.age(),
                age_band: need.age_band,
                lives_with_parent: b.lives_with_parent(),
                benefit_to_co_parent: b.benefit_to_co_parent(),
                table_amount: need.table_amount,
                benefit_deduction: need.benefit_deduction,
                pre_scaling: need.payable,
                final_amount,
            })
            .collect();

        let result = CalculationResult {
            guideline: request.guideline,
            payer,
            co_parent,
            resolution,
            bracket: search.bracket,
            percent: tables.brackets.percent(search.bracket),
            control_threshold: search.control_threshold,
            brackets_tried: search.tried,
            aggregate_payable: search.group.aggregate,
            residual_after_payment: search.residual,
            beneficiaries: breakdown,
            shortfall_applied,
            shortfall_factor,
            supplemental,
        };

        info!(
            "resolved bracket {} for {} beneficiaries, total {:.2}{}",
            result.bracket,
            result.beneficiaries.len(),
            result.total_regular(),
            if shortfall_applied { " (shortfall)" } else { "" }
        );

        Ok(result)
    }
}

impl Default for SupportEngine {
    fn default() -> Self {
        Self::new(RateTables::edition_2025())
    }
}
