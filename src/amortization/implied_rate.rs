//! Recover the loan rate from a payment stream
//!
//! Used to cross-check a generated schedule: discounting its payments at the
//! implied rate must give back the principal.

use super::schedule::Schedule;
use crate::loan::PAYMENTS_PER_YEAR;

const TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 200;

/// Periodic rate at which the present value of `payments` equals `principal`
///
/// Solved with Newton-Raphson, falling back to bisection when the derivative
/// vanishes or the iteration fails to converge. Returns `None` when no
/// non-negative rate exists (payments that do not even repay the principal).
pub fn implied_periodic_rate(principal: f64, payments: &[f64]) -> Option<f64> {
    if payments.is_empty() || principal <= 0.0 {
        return None;
    }

    let undiscounted: f64 = payments.iter().sum();
    if undiscounted < principal * (1.0 - TOLERANCE) {
        return None;
    }
    if (undiscounted - principal).abs() <= principal * TOLERANCE {
        return Some(0.0);
    }

    // Initial guess from the average interest share of a level payment
    let n = payments.len() as f64;
    let mut rate = 2.0 * (undiscounted - principal) / (principal * (n + 1.0));

    for _ in 0..MAX_ITERATIONS {
        let (pv, dpv) = pv_and_derivative(payments, rate);
        if dpv.abs() < 1e-300 {
            return bisection(principal, payments);
        }

        let next = (rate - (pv - principal) / dpv).max(0.0);
        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    bisection(principal, payments)
}

/// Nominal annual rate in percent implied by a schedule's payments
pub fn implied_annual_rate_percent(schedule: &Schedule) -> Option<f64> {
    let payments: Vec<f64> = schedule.records.iter().map(|r| r.payment_amount).collect();
    implied_periodic_rate(schedule.terms.principal, &payments)
        .map(|r| r * PAYMENTS_PER_YEAR as f64 * 100.0)
}

/// Effective annual rate in percent for a nominal annual percentage
pub fn effective_annual_rate_percent(annual_rate_percent: f64) -> f64 {
    let periodic = annual_rate_percent / 100.0 / PAYMENTS_PER_YEAR as f64;
    ((1.0 + periodic).powi(PAYMENTS_PER_YEAR as i32) - 1.0) * 100.0
}

/// Present value of payments (first payment one period out) and its derivative
fn pv_and_derivative(payments: &[f64], rate: f64) -> (f64, f64) {
    let mut pv = 0.0;
    let mut dpv = 0.0;

    for (idx, &amount) in payments.iter().enumerate() {
        let t = (idx + 1) as i32;
        let discount = (1.0 + rate).powi(t);
        pv += amount / discount;
        dpv -= t as f64 * amount / (discount * (1.0 + rate));
    }

    (pv, dpv)
}

fn present_value(payments: &[f64], rate: f64) -> f64 {
    pv_and_derivative(payments, rate).0
}

fn bisection(principal: f64, payments: &[f64]) -> Option<f64> {
    let mut low = 0.0_f64;
    let mut high = 1.0_f64;

    // PV falls as the rate rises; the root is bracketed when PV(high) < principal
    if present_value(payments, high) > principal {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let pv = present_value(payments, mid);

        if (pv - principal).abs() <= principal * TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if pv > principal {
            low = mid;
        } else {
            high = mid;
        }
    }

    None
}
