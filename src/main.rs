//! Support Engine CLI
//!
//! Command-line interface for running single support calculations

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use support_engine::case::{GrossIncome, IncomeDeductions};
use support_engine::{
    BatchRunner, Beneficiary, CalculationRequest, CalculationResult, Employment, GuidelinePreset,
    SupplementalNeeds,
};

#[derive(Parser)]
#[command(name = "support_engine")]
#[command(about = "Child-support calculation by the Duesseldorf table and regional guidelines")]
struct Cli {
    /// Directory with CSV rate tables (built-in 2025 edition if omitted)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate support for one case
    Calc {
        #[command(flatten)]
        case: CaseArgs,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run one case under every guideline preset
    Guidelines {
        #[command(flatten)]
        case: CaseArgs,
    },
}

#[derive(Args)]
struct CaseArgs {
    /// Adjusted net income of the payer (monthly)
    #[arg(long, required_unless_present = "gross")]
    income: Option<f64>,

    /// Gross income of the payer, used with --deductions instead of --income
    #[arg(long, conflicts_with = "income")]
    gross: Option<f64>,

    /// Total deductible items between gross and net
    #[arg(long, default_value_t = 0.0, requires = "gross")]
    deductions: f64,

    /// Adjusted net income of the co-parent
    #[arg(long, default_value_t = 0.0)]
    co_parent_income: f64,

    /// Beneficiary as AGE[:independent][:payer-benefit], repeatable
    #[arg(long = "child", required = true, value_parser = parse_child)]
    children: Vec<Beneficiary>,

    /// Guideline preset (nrw, frankfurt, dresden or the full name)
    #[arg(long, default_value = "nrw")]
    guideline: String,

    #[arg(long)]
    payer_unemployed: bool,

    #[arg(long)]
    co_parent_unemployed: bool,

    /// Skip the one-bracket increase for a single beneficiary
    #[arg(long)]
    no_increase: bool,

    #[arg(long, default_value_t = 0.0)]
    daycare: f64,

    #[arg(long, default_value_t = 0.0)]
    health: f64,

    #[arg(long, default_value_t = 0.0)]
    schooling: f64,

    #[arg(long, default_value_t = 0.0)]
    travel: f64,

    #[arg(long, default_value_t = 0.0)]
    other_needs: f64,
}

fn parse_child(raw: &str) -> std::result::Result<Beneficiary, String> {
    let mut parts = raw.split(':');
    let age: i64 = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .map_err(|_| format!("invalid age in '{}'", raw))?;

    let mut lives_with_parent = true;
    let mut benefit_to_co_parent = true;
    for flag in parts {
        match flag.trim() {
            "independent" => lives_with_parent = false,
            "payer-benefit" => benefit_to_co_parent = false,
            other => return Err(format!("unknown child flag '{}'", other)),
        }
    }

    Beneficiary::new(age, lives_with_parent, benefit_to_co_parent).map_err(|e| e.to_string())
}

impl CaseArgs {
    fn to_request(&self) -> Result<CalculationRequest> {
        let income = match (self.income, self.gross) {
            (Some(net), _) => net,
            (None, Some(gross)) => GrossIncome {
                gross,
                deductions: IncomeDeductions {
                    other: self.deductions,
                    ..Default::default()
                },
            }
            .net(),
            (None, None) => 0.0,
        };
        let guideline: GuidelinePreset = self.guideline.parse()?;

        Ok(CalculationRequest::new(income, self.children.clone())?
            .with_payer_employment(Employment::from_flag(!self.payer_unemployed))
            .with_co_parent(self.co_parent_income, Employment::from_flag(!self.co_parent_unemployed))
            .with_guideline(guideline)
            .with_single_beneficiary_increase(!self.no_increase)
            .with_supplemental(SupplementalNeeds {
                daycare: self.daycare,
                health: self.health,
                schooling: self.schooling,
                travel: self.travel,
                other: self.other_needs,
            }))
    }
}

fn print_result(result: &CalculationResult) {
    let res = &result.resolution;

    println!("Guideline: {}", result.guideline);
    println!("  Payer net income:   {:>10.2}  (protected minimum {:.2})", result.payer.net_income, result.payer.protected_minimum);
    println!("  Co-parent income:   {:>10.2}  (protected minimum {:.2})", result.co_parent.net_income, result.co_parent.protected_minimum);
    println!("  Base bracket:       {:>10}", res.base);
    println!("  Guideline adjusted: {:>10}  (step-down {})", res.guideline_adjusted, res.step_down);
    println!(
        "  Start bracket:      {:>10}{}",
        res.start,
        if res.increase_applied { "  (single-beneficiary increase)" } else { "" }
    );
    println!(
        "  Brackets tried:     {:>10}",
        result.brackets_tried.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(", ")
    );
    println!(
        "  Resolved bracket:   {:>10}  ({}%, control threshold {})",
        result.bracket,
        result.percent,
        result.control_threshold.map(|t| format!("{:.0}", t)).unwrap_or_else(|| "-".to_string())
    );
    println!("  Residual after pay: {:>10.2}", result.residual_after_payment);
    println!();

    println!("{:>3} {:>4} {:<20} {:>8} {:>10} {:>10} {:>10}", "#", "Age", "Band", "Table", "Benefit", "Pre", "Final");
    println!("{}", "-".repeat(72));
    for (i, b) in result.beneficiaries.iter().enumerate() {
        println!(
            "{:>3} {:>4} {:<20} {:>8} {:>10.2} {:>10.2} {:>10.2}",
            i + 1,
            b.age,
            b.age_band.to_string(),
            b.table_amount,
            -b.benefit_deduction,
            b.pre_scaling,
            b.final_amount
        );
    }

    if result.shortfall_applied {
        println!("\nShortfall scaling applied: factor {:.6}", result.shortfall_factor);
    }

    let s = &result.supplemental;
    println!("\nSupplemental needs: {:.2}", s.total);
    println!("  Quotas: payer {:.2}%, co-parent {:.2}%", s.payer_quota * 100.0, s.co_parent_quota * 100.0);
    println!("  Shares: payer {:.2}, co-parent {:.2}", s.payer_share, s.co_parent_share);

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Regular support:   {:.2}", summary.total_regular);
    println!("  Total per month:   {:.2}", summary.total_monthly);
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let runner = match &cli.tables {
        Some(dir) => BatchRunner::from_csv_path(dir)
            .with_context(|| format!("failed to load rate tables from {}", dir.display()))?,
        None => BatchRunner::new(),
    };

    match cli.command {
        Commands::Calc { case, json } => {
            let request = case.to_request()?;
            let result = runner.run(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Commands::Guidelines { case } => {
            let request = case.to_request()?;
            let results = runner.compare_guidelines(&request)?;

            println!("{:<24} {:>9} {:>7} {:>12} {:>10}", "Guideline", "Step-down", "Bracket", "Regular", "Shortfall");
            println!("{}", "-".repeat(66));
            for result in &results {
                let summary = result.summary();
                println!(
                    "{:<24} {:>9} {:>7} {:>12.2} {:>10}",
                    result.guideline.name(),
                    result.resolution.step_down,
                    summary.bracket,
                    summary.total_regular,
                    if summary.shortfall_applied { "yes" } else { "no" }
                );
            }
        }
    }

    Ok(())
}
