//! Level payment for a fully-amortizing fixed-rate loan

use crate::error::{MortgageError, MortgageResult};
use crate::loan::LoanTerms;

/// Monthly payment for the given loan terms
///
/// Uses the annuity formula in its discount-factor form `P * r / (1 - (1+r)^-n)`,
/// which tends to `P * r` for very high rates or long terms instead of
/// overflowing. At a zero rate the formula degenerates to 0/0, so the loan is
/// repaid in equal principal installments instead.
pub fn compute_monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> MortgageResult<f64> {
    let terms = LoanTerms::new(principal, annual_rate_percent, term_years)?;
    level_payment(&terms)
}

/// Monthly payment for already-built terms
pub fn level_payment(terms: &LoanTerms) -> MortgageResult<f64> {
    terms.validate()?;

    let n = terms.periods()?;
    let r = terms.periodic_rate();

    if r == 0.0 {
        return Ok(terms.principal / n as f64);
    }

    let discount = (1.0 + r).powf(-(n as f64));
    let payment = terms.principal * r / (1.0 - discount);
    if !payment.is_finite() {
        return Err(MortgageError::invalid(
            "principal",
            format!("payment for {} is not representable", terms.principal),
        ));
    }
    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_standard_thirty_year() {
        let payment = compute_monthly_payment(300_000.0, 4.5, 30).unwrap();
        assert_abs_diff_eq!(payment, 1520.06, epsilon = 0.005);
    }

    #[test]
    fn test_home_value_scenario() {
        // 500k home with a 100k deposit
        let payment = compute_monthly_payment(400_000.0, 5.5, 30).unwrap();
        assert_abs_diff_eq!(payment, 2271.16, epsilon = 0.005);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = compute_monthly_payment(12_000.0, 0.0, 1).unwrap();
        assert_relative_eq!(payment, 1000.0);

        let payment = compute_monthly_payment(250_000.0, 0.0, 25).unwrap();
        assert_relative_eq!(payment, 250_000.0 / 300.0);
    }

    #[test]
    fn test_payment_increases_with_rate() {
        let low = compute_monthly_payment(200_000.0, 3.0, 30).unwrap();
        let high = compute_monthly_payment(200_000.0, 7.0, 30).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_tiny_rate_approaches_straight_line() {
        let payment = compute_monthly_payment(120_000.0, 1e-6, 10).unwrap();
        assert_relative_eq!(payment, 1000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_extreme_rate_and_term_stay_finite() {
        // (1+r)^n overflows f64 here; the payment converges to interest-only
        let payment = compute_monthly_payment(100_000.0, 1000.0, 100).unwrap();
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 100_000.0 * 1000.0 / 1200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        for (p, r, t) in [(300_000.0, 4.5, 0), (0.0, 4.5, 30), (300_000.0, -1.0, 30)] {
            let err = compute_monthly_payment(p, r, t).unwrap_err();
            assert!(matches!(err, MortgageError::InvalidInput { .. }), "{p} {r} {t}");
        }
    }
}
