//! Acquisition inputs and their validation rules

mod data;
pub mod validate;

pub use data::{
    AcquisitionInput, FinancingTerms, InvestmentStrategy, Location, OperatingExpenseAssumptions,
    PropertyType, RentalIncomeAssumptions,
};
