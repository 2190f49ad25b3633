//! Support Engine - child-support resolution for the Duesseldorf table
//!
//! This library provides:
//! - Rate tables (income brackets, minimum needs, guideline presets, protected minimums)
//! - Bracket resolution with guideline step-downs and the single-beneficiary increase
//! - Needs-control downgrade search and shortfall (pro-rata) scaling
//! - Supplemental-needs cost sharing between both parents
//! - Batch evaluation of many cases

pub mod error;
pub mod tables;
pub mod case;
pub mod calculation;
pub mod batch;

// Re-export commonly used types
pub use error::{Result, SupportError};
pub use tables::{RateTables, GuidelinePreset, Employment};
pub use case::{Beneficiary, CalculationRequest, SupplementalNeeds};
pub use calculation::{SupportEngine, CalculationResult, ResultSummary};
pub use batch::BatchRunner;
