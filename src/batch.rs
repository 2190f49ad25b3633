//! Batch runner for many calculations
//!
//! Loads tables once, then evaluates any number of requests against the same
//! engine, sequentially or in parallel.

use crate::calculation::{CalculationResult, SupportEngine};
use crate::case::{CalculationRequest, Case};
use crate::error::Result;
use crate::tables::{GuidelinePreset, RateTables};
use log::info;
use rayon::prelude::*;

/// Pre-loaded batch runner
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::from_csv()?;
///
/// for income in [2500.0, 3500.0, 4500.0] {
///     let request = CalculationRequest::new(income, kids.clone())?;
///     let result = runner.run(&request)?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: SupportEngine,
}

impl BatchRunner {
    /// Runner with the built-in 2025 tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner with tables loaded from data/tables/
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_tables(RateTables::from_csv()?))
    }

    /// Runner with tables loaded from a specific directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self::with_tables(RateTables::from_csv_path(path)?))
    }

    pub fn with_tables(tables: RateTables) -> Self {
        Self {
            engine: SupportEngine::new(tables),
        }
    }

    pub fn run(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        self.engine.calculate(request)
    }

    /// Run requests one after another, stopping at the first invalid one
    pub fn run_batch(&self, requests: &[CalculationRequest]) -> Result<Vec<CalculationResult>> {
        requests.iter().map(|r| self.engine.calculate(r)).collect()
    }

    /// Run labelled cases in parallel. Results keep input order; each case
    /// carries its own outcome so one bad case doesn't sink the batch.
    pub fn run_cases_parallel<'a>(&self, cases: &'a [Case]) -> Vec<(&'a str, Result<CalculationResult>)> {
        info!("running {} cases on {} threads", cases.len(), rayon::current_num_threads());
        cases
            .par_iter()
            .map(|case| (case.id.as_str(), self.engine.calculate(&case.request)))
            .collect()
    }

    /// Run one request under every guideline preset the tables define
    pub fn compare_guidelines(&self, request: &CalculationRequest) -> Result<Vec<CalculationResult>> {
        GuidelinePreset::ALL
            .iter()
            .filter(|p| self.engine.tables().guidelines.contains(**p))
            .map(|&preset| self.engine.calculate(&request.clone().with_guideline(preset)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{parse_cases, Beneficiary};

    #[test]
    fn test_batch_bracket_rises_with_income() {
        let runner = BatchRunner::new();
        let kids = vec![Beneficiary::resident(4), Beneficiary::resident(9)];

        let requests: Vec<_> = [1800.0, 3000.0, 4500.0, 8000.0]
            .iter()
            .map(|&income| CalculationRequest::new(income, kids.clone()).unwrap())
            .collect();

        let results = runner.run_batch(&requests).unwrap();
        assert_eq!(results.len(), 4);

        let brackets: Vec<u8> = results.iter().map(|r| r.bracket).collect();
        assert!(brackets.windows(2).all(|w| w[0] <= w[1]), "{:?}", brackets);
        assert!(results[3].total_regular() > results[0].total_regular());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = BatchRunner::new();
        let cases = parse_cases(
            r#"[
                {"id": "one", "payer_net_income": 3000, "beneficiaries": [{"age": 7}]},
                {"id": "two", "payer_net_income": 1400, "beneficiaries": [{"age": 10}]},
                {"id": "three", "payer_net_income": 5200, "beneficiaries": [{"age": 1}, {"age": 6}, {"age": 13}, {"age": 16}]}
            ]"#,
        )
        .unwrap();

        let parallel = runner.run_cases_parallel(&cases);
        assert_eq!(parallel.len(), 3);

        for (case, (id, result)) in cases.iter().zip(&parallel) {
            assert_eq!(*id, case.id);
            let sequential = runner.run(&case.request).unwrap();
            assert_eq!(result.as_ref().unwrap(), &sequential);
        }
    }

    #[test]
    fn test_compare_guidelines() {
        let runner = BatchRunner::new();
        let request = CalculationRequest::new(4000.0, vec![Beneficiary::resident(3); 3]).unwrap();

        let results = runner.compare_guidelines(&request).unwrap();

        assert_eq!(results.len(), GuidelinePreset::ALL.len());
        for (result, preset) in results.iter().zip(GuidelinePreset::ALL) {
            assert_eq!(result.guideline, preset);
            assert_eq!(result.resolution.step_down, 1);
        }
    }
}
