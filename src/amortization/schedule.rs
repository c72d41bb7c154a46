//! Amortization schedule output structures and read-only views

use serde::{Deserialize, Serialize};

use crate::loan::{LoanTerms, year_of_period};

/// A single payment of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment number (1-indexed)
    pub period: u32,

    /// Loan year the payment falls in (1-indexed)
    pub year: u32,

    /// Total amount paid this period
    pub payment_amount: f64,

    /// Part of the payment that reduces the balance
    pub principal_portion: f64,

    /// Interest accrued on the balance before the payment
    pub interest_portion: f64,

    /// Balance outstanding after the payment
    pub remaining_balance: f64,
}

impl PaymentRecord {
    pub fn new(period: u32) -> Self {
        Self {
            period,
            year: year_of_period(period),
            payment_amount: 0.0,
            principal_portion: 0.0,
            interest_portion: 0.0,
            remaining_balance: 0.0,
        }
    }

    /// Balance outstanding before this payment was applied
    pub fn balance_before(&self) -> f64 {
        self.remaining_balance + self.principal_portion
    }
}

/// Complete schedule for one set of loan terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Terms the schedule was generated from
    pub terms: LoanTerms,

    /// Level monthly payment
    pub monthly_payment: f64,

    /// One record per payment, in order
    pub records: Vec<PaymentRecord>,
}

impl Schedule {
    pub fn new(terms: LoanTerms, monthly_payment: f64) -> Self {
        Self {
            terms,
            monthly_payment,
            records: Vec::new(),
        }
    }

    /// Add a payment record
    pub fn add_record(&mut self, record: PaymentRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        summarize(self)
    }

    pub fn yearly_balances(&self) -> Vec<YearlyBalance> {
        yearly_balances(&self.records)
    }

    pub fn yearly_totals(&self) -> Vec<YearlyTotals> {
        yearly_totals(&self.records)
    }
}

/// Totals over the life of the loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub principal: f64,
    pub monthly_payment: f64,
    pub periods: u32,
    pub total_payment: f64,
    pub total_interest: f64,
    pub final_balance: f64,
}

/// Lowest (end of year) balance for one loan year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyBalance {
    pub year: u32,
    pub min_remaining_balance: f64,
}

/// Principal and interest paid within one loan year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotals {
    pub year: u32,
    pub principal: f64,
    pub interest: f64,
}

/// Total paid and total interest for a schedule
///
/// A schedule without records has no payments, so every total is zero.
pub fn summarize(schedule: &Schedule) -> ScheduleSummary {
    let Some(last) = schedule.records.last() else {
        return ScheduleSummary {
            principal: schedule.terms.principal,
            monthly_payment: schedule.monthly_payment,
            periods: 0,
            total_payment: 0.0,
            total_interest: 0.0,
            final_balance: 0.0,
        };
    };

    let total_payment: f64 = schedule.records.iter().map(|r| r.payment_amount).sum();

    ScheduleSummary {
        principal: schedule.terms.principal,
        monthly_payment: schedule.monthly_payment,
        periods: schedule.records.len() as u32,
        total_payment,
        total_interest: total_payment - schedule.terms.principal,
        final_balance: last.remaining_balance,
    }
}

/// Minimum remaining balance per 12-payment bucket
///
/// A trailing partial year gets its own bucket.
pub fn yearly_balances(records: &[PaymentRecord]) -> Vec<YearlyBalance> {
    let mut out: Vec<YearlyBalance> = Vec::new();

    for record in records {
        let year = year_of_period(record.period);
        match out.last_mut() {
            Some(bucket) if bucket.year == year => {
                bucket.min_remaining_balance =
                    bucket.min_remaining_balance.min(record.remaining_balance);
            }
            _ => out.push(YearlyBalance {
                year,
                min_remaining_balance: record.remaining_balance,
            }),
        }
    }

    out
}

/// Principal and interest summed per 12-payment bucket
pub fn yearly_totals(records: &[PaymentRecord]) -> Vec<YearlyTotals> {
    let mut out: Vec<YearlyTotals> = Vec::new();

    for record in records {
        let year = year_of_period(record.period);
        match out.last_mut() {
            Some(bucket) if bucket.year == year => {
                bucket.principal += record.principal_portion;
                bucket.interest += record.interest_portion;
            }
            _ => out.push(YearlyTotals {
                year,
                principal: record.principal_portion,
                interest: record.interest_portion,
            }),
        }
    }

    out
}
