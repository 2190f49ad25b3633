//! Run a batch of cases from a JSON file
//!
//! Usage: run_batch <cases.json> [output.csv]
//!
//! Cases are evaluated in parallel; one CSV row per case is written, invalid
//! cases included with their error message.

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Instant;
use support_engine::case::load_cases;
use support_engine::BatchRunner;

#[derive(Debug, Default, Serialize)]
struct BatchRow {
    id: String,
    guideline: String,
    bracket: Option<u8>,
    start_bracket: Option<u8>,
    brackets_tried: String,
    total_regular: Option<f64>,
    shortfall_applied: Option<bool>,
    shortfall_factor: Option<f64>,
    payer_supplemental_share: Option<f64>,
    co_parent_supplemental_share: Option<f64>,
    total_monthly: Option<f64>,
    error: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let input = args
        .get(1)
        .context("usage: run_batch <cases.json> [output.csv]")?;
    let output_path = args.get(2).map(String::as_str).unwrap_or("batch_output.csv");

    let start = Instant::now();
    let cases = load_cases(input).with_context(|| format!("failed to load cases from {}", input))?;
    println!("Loaded {} cases in {:?}", cases.len(), start.elapsed());

    let runner = BatchRunner::from_csv().unwrap_or_else(|e| {
        log::warn!("CSV tables unavailable ({}), using built-in 2025 tables", e);
        BatchRunner::new()
    });

    let calc_start = Instant::now();
    let outcomes = runner.run_cases_parallel(&cases);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("failed to create {}", output_path))?;

    let mut failed = 0usize;
    let mut total_regular = 0.0;

    for (id, outcome) in outcomes {
        let row = match outcome {
            Ok(result) => {
                let summary = result.summary();
                total_regular += summary.total_regular;
                BatchRow {
                    id: id.to_string(),
                    guideline: result.guideline.name().to_string(),
                    bracket: Some(result.bracket),
                    start_bracket: Some(result.resolution.start),
                    brackets_tried: result
                        .brackets_tried
                        .iter()
                        .map(|b| b.to_string())
                        .collect::<Vec<_>>()
                        .join(" "),
                    total_regular: Some(summary.total_regular),
                    shortfall_applied: Some(result.shortfall_applied),
                    shortfall_factor: Some(result.shortfall_factor),
                    payer_supplemental_share: Some(result.supplemental.payer_share),
                    co_parent_supplemental_share: Some(result.supplemental.co_parent_share),
                    total_monthly: Some(summary.total_monthly),
                    error: String::new(),
                }
            }
            Err(e) => {
                failed += 1;
                BatchRow {
                    id: id.to_string(),
                    error: e.to_string(),
                    ..Default::default()
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to: {}", output_path);
    println!("\n=== Summary ===");
    println!("Cases:          {}", cases.len());
    println!("Failed:         {}", failed);
    println!("Total regular:  {:.2}", total_regular);
    println!("Total time:     {:?}", start.elapsed());

    Ok(())
}
