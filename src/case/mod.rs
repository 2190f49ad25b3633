//! Case inputs and request loading

mod data;
pub mod loader;

pub use data::{
    Beneficiary, CalculationRequest, GrossIncome, IncomeDeductions, PartyIncome, SupplementalNeeds,
};
pub use loader::{load_cases, parse_cases, Case, CaseInput};
