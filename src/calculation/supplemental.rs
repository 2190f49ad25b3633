//! Supplemental needs: split extra costs between payer and co-parent by
//! their income above the protected minimum

use super::shortfall::round_cents;
use crate::case::PartyIncome;
use serde::Serialize;

/// Liability quotas and shares of the supplemental needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupplementalSplit {
    pub total: f64,
    pub payer_available: f64,
    pub co_parent_available: f64,
    pub payer_quota: f64,
    pub co_parent_quota: f64,
    pub payer_share: f64,
    pub co_parent_share: f64,
}

/// Split `total` by each party's available income.
///
/// When neither party has income above their protected minimum, both quotas
/// and both shares are zero.
pub fn allocate(total: f64, payer: &PartyIncome, co_parent: &PartyIncome) -> SupplementalSplit {
    let payer_available = payer.available();
    let co_parent_available = co_parent.available();
    let available_total = payer_available + co_parent_available;

    let (payer_quota, co_parent_quota) = if available_total <= 0.0 {
        (0.0, 0.0)
    } else {
        (payer_available / available_total, co_parent_available / available_total)
    };

    SupplementalSplit {
        total,
        payer_available,
        co_parent_available,
        payer_quota,
        co_parent_quota,
        payer_share: round_cents(total * payer_quota),
        co_parent_share: round_cents(total * co_parent_quota),
    }
}
