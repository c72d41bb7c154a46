//! Loan terms supplied by the caller

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, MortgageResult};

/// Number of payments (and compounding periods) per year
pub const PAYMENTS_PER_YEAR: u32 = 12;

/// Fixed-rate loan terms
///
/// Fields are public so callers can build terms from any source, but every
/// engine entry point re-validates through [`LoanTerms::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent (4.5 means 4.5%)
    pub annual_rate_percent: f64,

    /// Years to fully repay the loan
    pub term_years: u32,
}

impl LoanTerms {
    /// Create validated loan terms
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> MortgageResult<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_years,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Derive the loan amount from a purchase price and the buyer's deposit
    pub fn from_home_value(
        home_value: f64,
        deposit: f64,
        annual_rate_percent: f64,
        term_years: u32,
    ) -> MortgageResult<Self> {
        if !home_value.is_finite() || home_value <= 0.0 {
            return Err(MortgageError::invalid("home_value", "must be a positive amount"));
        }
        if !deposit.is_finite() || deposit < 0.0 {
            return Err(MortgageError::invalid("deposit", "must not be negative"));
        }
        if deposit >= home_value {
            return Err(MortgageError::invalid(
                "deposit",
                format!("deposit {deposit} leaves nothing to borrow against home value {home_value}"),
            ));
        }
        Self::new(home_value - deposit, annual_rate_percent, term_years)
    }

    /// Check the invariants every schedule relies on
    pub fn validate(&self) -> MortgageResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(MortgageError::invalid(
                "principal",
                format!("must be positive, got {}", self.principal),
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(MortgageError::invalid(
                "annual_rate_percent",
                format!("must be zero or positive, got {}", self.annual_rate_percent),
            ));
        }
        if self.term_years == 0 {
            return Err(MortgageError::invalid("term_years", "must be at least one year"));
        }
        self.periods().map(|_| ())
    }

    /// Monthly rate as a decimal
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / PAYMENTS_PER_YEAR as f64
    }

    /// Total number of monthly payments
    pub fn periods(&self) -> MortgageResult<u32> {
        self.term_years
            .checked_mul(PAYMENTS_PER_YEAR)
            .ok_or_else(|| {
                MortgageError::invalid(
                    "term_years",
                    format!("{} years overflows the payment count", self.term_years),
                )
            })
    }
}

/// Year of the loan a payment falls in (1-indexed)
pub fn year_of_period(period: u32) -> u32 {
    (period + PAYMENTS_PER_YEAR - 1) / PAYMENTS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_home_value_minus_deposit() {
        let terms = LoanTerms::from_home_value(500_000.0, 100_000.0, 5.5, 30).unwrap();
        assert_relative_eq!(terms.principal, 400_000.0);
        assert_eq!(terms.periods().unwrap(), 360);
    }

    #[test]
    fn test_deposit_covering_home_value_rejected() {
        let err = LoanTerms::from_home_value(300_000.0, 300_000.0, 4.5, 30).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { field: "deposit", .. }));
    }

    #[test]
    fn test_invalid_terms() {
        assert!(LoanTerms::new(0.0, 4.5, 30).is_err());
        assert!(LoanTerms::new(-5.0, 4.5, 30).is_err());
        assert!(LoanTerms::new(100_000.0, -1.0, 30).is_err());
        assert!(LoanTerms::new(100_000.0, 4.5, 0).is_err());
        assert!(LoanTerms::new(f64::NAN, 4.5, 30).is_err());
        assert!(LoanTerms::new(100_000.0, f64::INFINITY, 30).is_err());
        assert!(LoanTerms::new(100_000.0, 4.5, u32::MAX).is_err());
    }

    #[test]
    fn test_zero_rate_is_valid() {
        let terms = LoanTerms::new(12_000.0, 0.0, 1).unwrap();
        assert_eq!(terms.periodic_rate(), 0.0);
    }

    #[test]
    fn test_year_of_period() {
        assert_eq!(year_of_period(1), 1);
        assert_eq!(year_of_period(12), 1);
        assert_eq!(year_of_period(13), 2);
        assert_eq!(year_of_period(360), 30);
    }
}
