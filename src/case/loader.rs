//! Load calculation requests from JSON
//!
//! Accepts either a single request object or an array of them. Raw input is
//! validated on conversion, so a bad age or preset name is reported with the
//! case it came from.

use super::{Beneficiary, CalculationRequest, GrossIncome, SupplementalNeeds};
use crate::error::{Result, SupportError};
use crate::tables::{Employment, GuidelinePreset};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_true() -> bool {
    true
}

fn default_guideline() -> String {
    GuidelinePreset::default().name().to_string()
}

/// Raw beneficiary as it appears in a request file
#[derive(Debug, Clone, Deserialize)]
pub struct BeneficiaryInput {
    pub age: i64,
    #[serde(default = "default_true")]
    pub lives_with_parent: bool,
    #[serde(default = "default_true")]
    pub benefit_to_co_parent: bool,
}

/// Raw request as it appears in a request file
#[derive(Debug, Clone, Deserialize)]
pub struct CaseInput {
    /// Optional label carried into batch output
    #[serde(default)]
    pub id: Option<String>,

    /// Adjusted net income of the payer. Takes precedence over `payer_gross`.
    #[serde(default)]
    pub payer_net_income: Option<f64>,

    /// Gross income and deductions, used when no net figure is given
    #[serde(default)]
    pub payer_gross: Option<GrossIncome>,

    #[serde(default)]
    pub co_parent_net_income: f64,

    #[serde(default = "default_true")]
    pub payer_employed: bool,

    #[serde(default = "default_true")]
    pub co_parent_employed: bool,

    pub beneficiaries: Vec<BeneficiaryInput>,

    #[serde(default = "default_guideline")]
    pub guideline: String,

    #[serde(default)]
    pub supplemental: SupplementalNeeds,

    #[serde(default = "default_true")]
    pub single_beneficiary_increase: bool,
}

/// A validated request with its label
#[derive(Debug, Clone)]
pub struct Case {
    pub id: String,
    pub request: CalculationRequest,
}

impl CaseInput {
    /// Validate into a request
    pub fn into_case(self, fallback_id: usize) -> Result<Case> {
        let payer_net_income = match (self.payer_net_income, &self.payer_gross) {
            (Some(net), _) => net,
            (None, Some(gross)) => gross.net(),
            (None, None) => {
                warn!("case {}: no payer income given, using 0", fallback_id);
                0.0
            }
        };

        let beneficiaries = self
            .beneficiaries
            .iter()
            .map(|b| Beneficiary::new(b.age, b.lives_with_parent, b.benefit_to_co_parent))
            .collect::<Result<Vec<_>>>()?;

        let guideline: GuidelinePreset = self.guideline.parse()?;

        let request = CalculationRequest::new(payer_net_income, beneficiaries)?
            .with_payer_employment(Employment::from_flag(self.payer_employed))
            .with_co_parent(self.co_parent_net_income, Employment::from_flag(self.co_parent_employed))
            .with_guideline(guideline)
            .with_supplemental(self.supplemental)
            .with_single_beneficiary_increase(self.single_beneficiary_increase);

        Ok(Case {
            id: self.id.unwrap_or_else(|| format!("case-{}", fallback_id)),
            request,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<CaseInput>),
    One(Box<CaseInput>),
}

/// Parse and validate requests from a JSON string
pub fn parse_cases(json: &str) -> Result<Vec<Case>> {
    let inputs = match serde_json::from_str::<OneOrMany>(json)? {
        OneOrMany::Many(v) => v,
        OneOrMany::One(one) => vec![*one],
    };

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| input.into_case(i + 1))
        .collect()
}

/// Load and validate requests from a JSON file
pub fn load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<Case>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let cases = parse_cases(&text)?;
    debug!("loaded {} cases from {}", cases.len(), path.display());
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_object_with_defaults() {
        let cases = parse_cases(r#"{"payer_net_income": 3000, "beneficiaries": [{"age": 7}]}"#).unwrap();

        assert_eq!(cases.len(), 1);
        let case = &cases[0];
        assert_eq!(case.id, "case-1");
        assert_eq!(case.request.payer_net_income, 3000.0);
        assert_eq!(case.request.guideline, GuidelinePreset::Duesseldorf);
        assert!(case.request.beneficiaries[0].benefit_to_co_parent());
        assert!(case.request.single_beneficiary_increase);
    }

    #[test]
    fn test_parse_array_with_gross_income() {
        let json = r#"[
            {"id": "a", "payer_net_income": 2500, "beneficiaries": [{"age": 3}, {"age": 12}], "guideline": "dresden"},
            {"id": "b", "payer_gross": {"gross": 4000, "deductions": {"taxes_and_social_security": 1300}},
             "payer_employed": false, "beneficiaries": [{"age": 19, "lives_with_parent": false}],
             "supplemental": {"daycare": 100, "health": 20}}
        ]"#;
        let cases = parse_cases(json).unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].request.guideline, GuidelinePreset::Dresden);
        assert_eq!(cases[1].id, "b");
        assert_eq!(cases[1].request.payer_net_income, 2700.0);
        assert_eq!(cases[1].request.payer_employment, Employment::Unemployed);
        assert_eq!(cases[1].request.supplemental.total(), 120.0);
        assert!(cases[1].request.all_non_privileged_adults());
    }

    #[test]
    fn test_invalid_inputs_are_reported() {
        let err = parse_cases(r#"{"payer_net_income": 3000, "beneficiaries": [{"age": -2}]}"#).unwrap_err();
        assert!(matches!(err, SupportError::InvalidAge(-2)));

        let err = parse_cases(r#"{"payer_net_income": 3000, "beneficiaries": [{"age": 4}], "guideline": "Hamm"}"#)
            .unwrap_err();
        assert!(matches!(err, SupportError::UnknownGuideline { .. }));

        let err = parse_cases(r#"{"payer_net_income": 3000, "beneficiaries": []}"#).unwrap_err();
        assert!(matches!(err, SupportError::NoBeneficiaries));

        let err = parse_cases("not json").unwrap_err();
        assert!(matches!(err, SupportError::Json(_)));
    }
}
