//! Chart series and display helpers derived from a schedule

use serde::Serialize;

use crate::amortization::{PaymentRecord, Schedule};
use crate::loan::PAYMENTS_PER_YEAR;

/// One point of the balance-over-time chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalancePoint {
    pub period: u32,
    pub remaining_balance: f64,
}

/// Principal versus total interest over the life of the loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentBreakdown {
    pub principal: f64,
    pub interest: f64,
}

impl PaymentBreakdown {
    /// Share of total cost that is interest, between 0 and 1
    pub fn interest_share(&self) -> f64 {
        let total = self.principal + self.interest;
        if total <= 0.0 {
            0.0
        } else {
            self.interest / total
        }
    }
}

/// Balance sampled at the first payment, every year boundary and the last payment
pub fn balance_points(schedule: &Schedule) -> Vec<BalancePoint> {
    let records = &schedule.records;
    let Some(last_idx) = records.len().checked_sub(1) else {
        return Vec::new();
    };

    let step = PAYMENTS_PER_YEAR as usize;
    let mut indices: Vec<usize> = (0..records.len()).step_by(step).collect();
    if indices.last() != Some(&last_idx) {
        indices.push(last_idx);
    }

    indices
        .into_iter()
        .map(|idx| BalancePoint {
            period: records[idx].period,
            remaining_balance: records[idx].remaining_balance,
        })
        .collect()
}

pub fn payment_breakdown(schedule: &Schedule) -> PaymentBreakdown {
    let summary = schedule.summary();
    PaymentBreakdown {
        principal: summary.principal,
        interest: summary.total_interest,
    }
}

/// Records shown in the on-screen table
pub fn first_year(schedule: &Schedule) -> &[PaymentRecord] {
    let end = schedule.records.len().min(PAYMENTS_PER_YEAR as usize);
    &schedule.records[..end]
}

/// Format an amount as dollars with thousands separators, e.g. `$1,520.06`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
