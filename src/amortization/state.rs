//! Running balance carried from one payment to the next

use crate::loan::{LoanTerms, year_of_period};

/// State of the loan between payments
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Payments applied so far (the next payment is `period + 1`)
    pub period: u32,

    /// Loan year of the current period (1-indexed)
    pub year: u32,

    /// Outstanding balance before the current payment
    pub bop_balance: f64,

    /// Outstanding balance after the current payment
    pub eop_balance: f64,

    /// Principal repaid so far
    pub cumulative_principal: f64,

    /// Interest paid so far
    pub cumulative_interest: f64,
}

impl AmortizationState {
    /// Initialize state at loan origination
    pub fn from_terms(terms: &LoanTerms) -> Self {
        Self {
            period: 0,
            year: 1,
            bop_balance: terms.principal,
            eop_balance: terms.principal,
            cumulative_principal: 0.0,
            cumulative_interest: 0.0,
        }
    }

    /// Advance to the next payment
    pub fn advance_period(&mut self) {
        self.period += 1;
        self.year = year_of_period(self.period);

        // BOP balance comes from prior EOP
        self.bop_balance = self.eop_balance;
    }

    /// Record an applied payment
    pub fn apply(&mut self, principal_portion: f64, interest_portion: f64, eop_balance: f64) {
        self.cumulative_principal += principal_portion;
        self.cumulative_interest += interest_portion;
        self.eop_balance = eop_balance;
    }
}
