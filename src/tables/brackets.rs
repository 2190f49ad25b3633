//! Income brackets, percentage multipliers and needs-control thresholds

use serde::{Deserialize, Serialize};

/// Lowest bracket index
pub const MIN_BRACKET: u8 = 1;

/// Highest bracket index
pub const MAX_BRACKET: u8 = 15;

/// One row of the income table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeBracket {
    /// Bracket index (1-indexed)
    pub index: u8,

    /// Lower bound of the net income range (inclusive)
    pub lower: f64,

    /// Upper bound of the net income range (inclusive)
    pub upper: f64,

    /// Percentage applied to the minimum need (100 = minimum support)
    pub percent: u32,

    /// Residual income the payer must keep after paying at this bracket.
    /// `None` for bracket 1, which is never downgraded.
    pub control_threshold: Option<f64>,
}

/// The full bracket table, ordered by index
#[derive(Debug, Clone)]
pub struct BracketTable {
    rows: Vec<IncomeBracket>,
}

impl BracketTable {
    /// Build from rows already validated by the loader
    pub(crate) fn from_rows(mut rows: Vec<IncomeBracket>) -> Self {
        rows.sort_by_key(|r| r.index);
        Self { rows }
    }

    /// 2025 edition of the table
    pub fn edition_2025() -> Self {
        // (index, lower, upper, percent, threshold)
        const ROWS: [(u8, f64, f64, u32, Option<f64>); 15] = [
            (1, 0.0, 2100.0, 100, None),
            (2, 2101.0, 2500.0, 105, Some(1750.0)),
            (3, 2501.0, 2900.0, 110, Some(1850.0)),
            (4, 2901.0, 3300.0, 115, Some(1950.0)),
            (5, 3301.0, 3700.0, 120, Some(2050.0)),
            (6, 3701.0, 4100.0, 128, Some(2150.0)),
            (7, 4101.0, 4500.0, 136, Some(2250.0)),
            (8, 4501.0, 4900.0, 144, Some(2350.0)),
            (9, 4901.0, 5300.0, 152, Some(2450.0)),
            (10, 5301.0, 5700.0, 160, Some(2550.0)),
            (11, 5701.0, 6400.0, 168, Some(2850.0)),
            (12, 6401.0, 7200.0, 176, Some(3250.0)),
            (13, 7201.0, 8200.0, 184, Some(3750.0)),
            (14, 8201.0, 9700.0, 192, Some(4350.0)),
            (15, 9701.0, 11200.0, 200, Some(5050.0)),
        ];

        Self {
            rows: ROWS
                .iter()
                .map(|&(index, lower, upper, percent, control_threshold)| IncomeBracket {
                    index,
                    lower,
                    upper,
                    percent,
                    control_threshold,
                })
                .collect(),
        }
    }

    /// Get the row for a bracket, clamping the index into [1, 15]
    pub fn get(&self, bracket: u8) -> &IncomeBracket {
        let idx = clamp_bracket(bracket as i32) as usize - 1;
        &self.rows[idx]
    }

    /// Percentage multiplier for a bracket
    pub fn percent(&self, bracket: u8) -> u32 {
        self.get(bracket).percent
    }

    /// Needs-control threshold for a bracket (None = no constraint)
    pub fn control_threshold(&self, bracket: u8) -> Option<f64> {
        self.get(bracket).control_threshold
    }

    /// Bracket whose income range contains the given net income
    ///
    /// Ranges are treated as contiguous: the last bracket whose lower bound
    /// does not exceed the income wins, so 2100.40 stays in bracket 1.
    /// Zero or negative incomes resolve to bracket 1, anything above the top
    /// ceiling resolves to bracket 15.
    pub fn bracket_for_income(&self, net_income: f64) -> u8 {
        if net_income.is_nan() || net_income <= 0.0 {
            return MIN_BRACKET;
        }
        self.rows
            .iter()
            .rev()
            .find(|row| net_income >= row.lower)
            .map(|row| row.index)
            .unwrap_or(MIN_BRACKET)
    }

    /// All rows in index order
    pub fn rows(&self) -> &[IncomeBracket] {
        &self.rows
    }
}

/// Clamp an arbitrary bracket number into [1, 15]
pub fn clamp_bracket(bracket: i32) -> u8 {
    bracket.clamp(MIN_BRACKET as i32, MAX_BRACKET as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_row_boundary() {
        let table = BracketTable::edition_2025();

        for row in table.rows() {
            assert_eq!(table.bracket_for_income(row.upper), row.index);
            if row.index > 1 {
                assert_eq!(table.bracket_for_income(row.lower), row.index);
                assert_eq!(table.bracket_for_income(row.lower - 1.0), row.index - 1);
            }
        }
    }

    #[test]
    fn test_income_clamping() {
        let table = BracketTable::edition_2025();

        assert_eq!(table.bracket_for_income(0.0), 1);
        assert_eq!(table.bracket_for_income(-500.0), 1);
        assert_eq!(table.bracket_for_income(f64::NAN), 1);
        assert_eq!(table.bracket_for_income(11_200.0), 15);
        assert_eq!(table.bracket_for_income(25_000.0), 15);
    }

    #[test]
    fn test_fractional_income_between_ranges() {
        let table = BracketTable::edition_2025();

        assert_eq!(table.bracket_for_income(2100.40), 1);
        assert_eq!(table.bracket_for_income(2100.99), 1);
        assert_eq!(table.bracket_for_income(3000.0), 4);
        assert_eq!(table.bracket_for_income(3300.50), 4);
        assert_eq!(table.bracket_for_income(5700.99), 10);
        assert_eq!(table.bracket_for_income(11_200.50), 15);
    }

    #[test]
    fn test_percent_and_threshold() {
        let table = BracketTable::edition_2025();

        assert_eq!(table.percent(1), 100);
        assert_eq!(table.percent(5), 120);
        assert_eq!(table.percent(15), 200);
        assert_eq!(table.control_threshold(1), None);
        assert_eq!(table.control_threshold(2), Some(1750.0));
        assert_eq!(table.control_threshold(11), Some(2850.0));
        assert_eq!(table.control_threshold(15), Some(5050.0));

        // Out-of-range indices clamp
        assert_eq!(table.percent(0), 100);
        assert_eq!(table.percent(40), 200);
    }

    #[test]
    fn test_thresholds_and_percents_ascend() {
        let table = BracketTable::edition_2025();
        let rows = table.rows();

        for pair in rows.windows(2) {
            assert!(pair[1].percent > pair[0].percent);
            assert!(pair[1].lower > pair[0].upper);
            if let (Some(a), Some(b)) = (pair[0].control_threshold, pair[1].control_threshold) {
                assert!(b > a);
            }
        }
    }
}
