//! Mortgage Calculator - Fixed-rate payment and amortization engine
//!
//! This library provides:
//! - Level monthly payment for fully-amortizing loans (including zero-rate loans)
//! - Month-by-month principal/interest/balance schedules
//! - Yearly and lifetime aggregates, chart series and CSV export
//! - Batch and rate-sensitivity runs over many loans

pub mod error;
pub mod config;
pub mod loan;
pub mod amortization;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{MortgageError, MortgageResult};
pub use config::CalculatorConfig;
pub use loan::LoanTerms;
pub use amortization::{
    AmortizationEngine, PaymentRecord, Schedule, ScheduleSummary,
    compute_monthly_payment, generate_schedule, summarize, yearly_balances, yearly_totals,
};
pub use scenario::ScenarioRunner;
