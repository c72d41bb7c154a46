//! Calculator defaults and input limits
//!
//! Defaults and limits match the calculator's input panel. Each value can be
//! overridden through the environment:
//!   MORTGAGE_LOAN_AMOUNT, MORTGAGE_RATE, MORTGAGE_TERM_YEARS,
//!   MORTGAGE_HOME_VALUE, MORTGAGE_DEPOSIT,
//!   MORTGAGE_MIN_LOAN, MORTGAGE_MAX_LOAN, MORTGAGE_MAX_RATE, MORTGAGE_MAX_TERM_YEARS
//! Unparsable values are ignored and the default is kept.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, MortgageResult};
use crate::loan::LoanTerms;

/// Default loan amount when none is supplied
pub const DEFAULT_LOAN_AMOUNT: f64 = 300_000.0;
/// Default annual rate in percent
pub const DEFAULT_RATE_PERCENT: f64 = 4.5;
/// Default term in years
pub const DEFAULT_TERM_YEARS: u32 = 30;
/// Default file name for schedule downloads
pub const DEFAULT_EXPORT_FILE: &str = "mortgage_amortization.csv";

/// Accepted ranges for calculator input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputLimits {
    pub min_loan_amount: f64,
    pub max_loan_amount: f64,
    pub min_rate_percent: f64,
    pub max_rate_percent: f64,
    pub min_term_years: u32,
    pub max_term_years: u32,
}

impl InputLimits {
    /// Validate the terms, then reject any field outside its range
    pub fn check(&self, terms: &LoanTerms) -> MortgageResult<()> {
        terms.validate()?;

        check_range("principal", terms.principal, self.min_loan_amount, self.max_loan_amount)?;
        check_range(
            "annual_rate_percent",
            terms.annual_rate_percent,
            self.min_rate_percent,
            self.max_rate_percent,
        )?;
        check_range(
            "term_years",
            terms.term_years as f64,
            self.min_term_years as f64,
            self.max_term_years as f64,
        )
    }
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_loan_amount: 10_000.0,
            max_loan_amount: 10_000_000.0,
            // Zero is allowed: the engine amortizes interest-free loans
            min_rate_percent: 0.0,
            max_rate_percent: 20.0,
            min_term_years: 1,
            max_term_years: 40,
        }
    }
}

/// Defaults plus limits for a calculator session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub loan_amount: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    pub home_value: f64,
    pub deposit: f64,
    pub limits: InputLimits,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            loan_amount: DEFAULT_LOAN_AMOUNT,
            annual_rate_percent: DEFAULT_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
            home_value: 500_000.0,
            deposit: 100_000.0,
            limits: InputLimits::default(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring unparsable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl CalculatorConfig {
    /// Defaults with any `MORTGAGE_*` environment overrides applied
    pub fn from_env() -> Self {
        let base = Self::default();
        let limits = base.limits;

        Self {
            loan_amount: env_or("MORTGAGE_LOAN_AMOUNT", base.loan_amount),
            annual_rate_percent: env_or("MORTGAGE_RATE", base.annual_rate_percent),
            term_years: env_or("MORTGAGE_TERM_YEARS", base.term_years),
            home_value: env_or("MORTGAGE_HOME_VALUE", base.home_value),
            deposit: env_or("MORTGAGE_DEPOSIT", base.deposit),
            limits: InputLimits {
                min_loan_amount: env_or("MORTGAGE_MIN_LOAN", limits.min_loan_amount),
                max_loan_amount: env_or("MORTGAGE_MAX_LOAN", limits.max_loan_amount),
                max_rate_percent: env_or("MORTGAGE_MAX_RATE", limits.max_rate_percent),
                max_term_years: env_or("MORTGAGE_MAX_TERM_YEARS", limits.max_term_years),
                ..limits
            },
        }
    }

    /// Loan terms built from the configured defaults
    pub fn default_terms(&self) -> MortgageResult<LoanTerms> {
        LoanTerms::new(self.loan_amount, self.annual_rate_percent, self.term_years)
    }

    /// Reject terms outside the configured limits
    pub fn check(&self, terms: &LoanTerms) -> MortgageResult<()> {
        self.limits.check(terms)
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> MortgageResult<()> {
    if value < min || value > max {
        return Err(MortgageError::OutOfRange { field, value, min, max });
    }
    Ok(())
}
