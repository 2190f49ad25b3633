//! Needs-control search: step brackets down until the payer keeps the
//! bracket's control threshold after paying everyone

use super::need::{needs_for_bracket, GroupNeed};
use crate::case::Beneficiary;
use crate::tables::{clamp_bracket, RateTables, MIN_BRACKET};
use log::debug;
use serde::Serialize;

/// Result of the downgrade search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DowngradeOutcome {
    /// Accepted bracket
    pub bracket: u8,
    /// Brackets visited, in visiting order (strictly decreasing)
    pub tried: Vec<u8>,
    /// Needs at the accepted bracket
    pub group: GroupNeed,
    /// Payer income minus aggregate payable at the accepted bracket
    pub residual: f64,
    pub control_threshold: Option<f64>,
}

/// Does paying `group` at its bracket leave the payer at or above the
/// bracket's control threshold? Brackets without a threshold always pass.
pub fn clears_threshold(tables: &RateTables, payer_income: f64, group: &GroupNeed) -> bool {
    match tables.brackets.control_threshold(group.bracket) {
        None => true,
        Some(threshold) => payer_income - group.aggregate >= threshold,
    }
}

/// Walk down from `start` to bracket 1, stopping at the first bracket that
/// clears its threshold. Bracket 1 is always accepted.
pub fn downgrade_search(
    tables: &RateTables,
    payer_income: f64,
    start: u8,
    beneficiaries: &[Beneficiary],
) -> DowngradeOutcome {
    let mut bracket = clamp_bracket(start as i32);
    let mut tried = Vec::with_capacity(bracket as usize);

    loop {
        tried.push(bracket);
        let group = needs_for_bracket(tables, beneficiaries, bracket);
        let residual = payer_income - group.aggregate;
        let control_threshold = tables.brackets.control_threshold(bracket);

        if bracket == MIN_BRACKET || clears_threshold(tables, payer_income, &group) {
            debug!(
                "downgrade search accepted bracket {} (residual {:.2}, threshold {:?}, tried {:?})",
                bracket, residual, control_threshold, tried
            );
            return DowngradeOutcome {
                bracket,
                tried,
                group,
                residual,
                control_threshold,
            };
        }

        debug!(
            "bracket {} fails control threshold: residual {:.2} < {:?}",
            bracket, residual, control_threshold
        );
        bracket -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_bracket_qualifies() {
        let tables = RateTables::edition_2025();
        let kids = [Beneficiary::resident(7)];

        let outcome = downgrade_search(&tables, 3000.0, 5, &kids);

        assert_eq!(outcome.bracket, 5);
        assert_eq!(outcome.tried, vec![5]);
        assert_relative_eq!(outcome.residual, 2462.5);
        assert_eq!(outcome.control_threshold, Some(2050.0));
    }

    #[test]
    fn test_steps_down_until_threshold_holds() {
        let tables = RateTables::edition_2025();
        let kids = [
            Beneficiary::resident(4),
            Beneficiary::resident(9),
            Beneficiary::resident(15),
        ];

        // Bracket 4: 555 + 638 + 747 = 1940 table, payable 1557.5, residual 1542.5 < 1950
        // Bracket 3: 531 + 610 + 714 = 1855 table, payable 1472.5, residual 1627.5 < 1850
        // Bracket 2: 507 + 582 + 682 = 1771 table, payable 1388.5, residual 1711.5 < 1750
        // Bracket 1: accepted unconditionally
        let outcome = downgrade_search(&tables, 3100.0, 4, &kids);

        assert_eq!(outcome.tried, vec![4, 3, 2, 1]);
        assert_eq!(outcome.bracket, 1);
        assert_eq!(outcome.control_threshold, None);
    }

    #[test]
    fn test_stops_at_highest_qualifying_bracket() {
        let tables = RateTables::edition_2025();
        let kids = [Beneficiary::resident(4), Beneficiary::resident(9)];

        // Bracket 6: 617 + 710 = 1327, payable 1072, residual 2928 >= 2150
        let outcome = downgrade_search(&tables, 4000.0, 6, &kids);
        assert_eq!(outcome.bracket, 6);

        // Income 3200 at bracket 6: residual 2128 < 2150; bracket 5: 579 + 665, payable 989, residual 2211 >= 2050
        let outcome = downgrade_search(&tables, 3200.0, 6, &kids);
        assert_eq!(outcome.tried, vec![6, 5]);
        assert_eq!(outcome.bracket, 5);
    }

    #[test]
    fn test_bracket_one_always_accepted() {
        let tables = RateTables::edition_2025();
        let kids = [Beneficiary::resident(15); 4];

        let outcome = downgrade_search(&tables, 0.0, 15, &kids);

        assert_eq!(outcome.bracket, 1);
        assert_eq!(outcome.tried, (1..=15).rev().collect::<Vec<u8>>());
        assert!(outcome.residual < 0.0);
    }

    #[test]
    fn test_start_is_clamped() {
        let tables = RateTables::edition_2025();
        let kids = [Beneficiary::resident(1)];

        let outcome = downgrade_search(&tables, 1000.0, 0, &kids);
        assert_eq!(outcome.tried, vec![1]);

        let outcome = downgrade_search(&tables, 50_000.0, 99, &kids);
        assert_eq!(outcome.tried, vec![15]);
    }
}
