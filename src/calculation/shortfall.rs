//! Shortfall: pro-rata reduction when even bracket 1 cuts into the payer's
//! protected minimum

use serde::Serialize;

/// Factors at or above this count as "no scaling"
pub const SCALING_EPSILON: f64 = 0.999_999;

/// Outcome of the proportional scaler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortfallOutcome {
    /// Income the payer can spend on support: max(0, income - protected minimum)
    pub allowed: f64,
    /// Scaling factor in [0, 1]
    pub factor: f64,
    /// Amounts after scaling, rounded to cents
    pub amounts: Vec<f64>,
}

impl ShortfallOutcome {
    /// True when amounts were actually reduced
    pub fn applied(&self) -> bool {
        self.factor < SCALING_EPSILON
    }
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale payable amounts so their sum fits into the allowed income.
///
/// If the aggregate is zero or already fits, amounts are returned unchanged
/// with factor 1.0.
pub fn scale_to_protected_minimum(payer_income: f64, protected_minimum: f64, payables: &[f64]) -> ShortfallOutcome {
    let total: f64 = payables.iter().sum();
    let allowed = (payer_income - protected_minimum).max(0.0);

    if total <= 0.0 || total <= allowed {
        return ShortfallOutcome {
            allowed,
            factor: 1.0,
            amounts: payables.to_vec(),
        };
    }

    let factor = allowed / total;
    ShortfallOutcome {
        allowed,
        factor,
        amounts: payables.iter().map(|p| round_cents(p * factor)).collect(),
    }
}
