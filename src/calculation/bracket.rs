//! Bracket resolution: income bracket, guideline step-down and the optional
//! one-bracket increase for a single beneficiary

use super::downgrade::clears_threshold;
use super::need::needs_for_bracket;
use crate::case::Beneficiary;
use crate::tables::{clamp_bracket, GuidelinePreset, RateTables};
use log::debug;
use serde::Serialize;

/// Starting point for the downgrade search and how it was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketResolution {
    /// Bracket containing the payer's income
    pub base: u8,
    /// Brackets removed by the guideline for the beneficiary count
    pub step_down: u32,
    /// Base bracket after the guideline step-down
    pub guideline_adjusted: u8,
    /// Whether the single-beneficiary increase was accepted
    pub increase_applied: bool,
    /// Bracket the downgrade search starts from
    pub start: u8,
}

/// Bracket whose income range contains the payer's income
pub fn base_bracket(tables: &RateTables, payer_income: f64) -> u8 {
    tables.brackets.bracket_for_income(payer_income)
}

/// Apply the preset's step-down for `beneficiaries` equal-rank beneficiaries.
/// Returns (adjusted bracket, step-down used).
pub fn apply_guideline(
    tables: &RateTables,
    base: u8,
    preset: GuidelinePreset,
    beneficiaries: usize,
) -> (u8, u32) {
    let step_down = tables.guidelines.step_down(preset, beneficiaries);
    let adjusted = clamp_bracket(base as i32 - step_down as i32);
    (adjusted, step_down)
}

/// Test a one-bracket increase above `adjusted`.
///
/// The increase is accepted only if paying at the incremented bracket already
/// leaves the payer at its control threshold, i.e. the downgrade search
/// started there would accept it on its first step. Returns the incremented
/// bracket when accepted; `None` at the top bracket or when rejected.
pub fn try_single_increase(
    tables: &RateTables,
    payer_income: f64,
    adjusted: u8,
    beneficiaries: &[Beneficiary],
) -> Option<u8> {
    let candidate = clamp_bracket(adjusted as i32 + 1);
    if candidate == adjusted {
        return None;
    }

    let group = needs_for_bracket(tables, beneficiaries, candidate);
    let accepted = clears_threshold(tables, payer_income, &group);
    debug!(
        "single-beneficiary increase {} -> {}: residual {:.2}, accepted {}",
        adjusted,
        candidate,
        payer_income - group.aggregate,
        accepted
    );
    accepted.then_some(candidate)
}

/// Base bracket -> guideline step-down -> optional increase
pub fn resolve_start(
    tables: &RateTables,
    payer_income: f64,
    preset: GuidelinePreset,
    beneficiaries: &[Beneficiary],
    allow_increase: bool,
) -> BracketResolution {
    let base = base_bracket(tables, payer_income);
    let (guideline_adjusted, step_down) = apply_guideline(tables, base, preset, beneficiaries.len());

    let increased = if allow_increase && beneficiaries.len() == 1 {
        try_single_increase(tables, payer_income, guideline_adjusted, beneficiaries)
    } else {
        None
    };

    BracketResolution {
        base,
        step_down,
        guideline_adjusted,
        increase_applied: increased.is_some(),
        start: increased.unwrap_or(guideline_adjusted),
    }
}
