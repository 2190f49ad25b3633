//! Support-amount resolution pipeline

mod bracket;
mod downgrade;
mod engine;
mod need;
mod result;
mod shortfall;
mod supplemental;

pub use bracket::{apply_guideline, base_bracket, resolve_start, try_single_increase, BracketResolution};
pub use downgrade::{clears_threshold, downgrade_search, DowngradeOutcome};
pub use engine::SupportEngine;
pub use need::{benefit_deduction, compute_need, needs_for_bracket, table_amount, BeneficiaryNeed, GroupNeed};
pub use result::{BeneficiaryBreakdown, CalculationResult, ResultSummary};
pub use shortfall::{round_cents, scale_to_protected_minimum, ShortfallOutcome, SCALING_EPSILON};
pub use supplemental::{allocate, SupplementalSplit};
