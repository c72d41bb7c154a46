//! Amortization engine: level payment, schedule generation and aggregate views

mod state;
mod engine;
mod payment;
mod schedule;
mod implied_rate;

pub use state::AmortizationState;
pub use engine::{AmortizationEngine, ScheduleConfig, Reconciliation, generate_schedule};
pub use payment::{compute_monthly_payment, level_payment};
pub use schedule::{
    PaymentRecord, Schedule, ScheduleSummary, YearlyBalance, YearlyTotals,
    summarize, yearly_balances, yearly_totals,
};
pub use implied_rate::{implied_periodic_rate, implied_annual_rate_percent, effective_annual_rate_percent};
