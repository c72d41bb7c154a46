//! Core engine expanding loan terms into a month-by-month schedule

use crate::error::MortgageResult;
use crate::loan::LoanTerms;
use super::payment::level_payment;
use super::schedule::{PaymentRecord, Schedule};
use super::state::AmortizationState;

/// How the last payment treats floating-point drift in the running balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconciliation {
    /// The final payment retires whatever balance is left, so the schedule
    /// ends at exactly zero and principal portions sum to the loan amount
    #[default]
    AbsorbResidual,
    /// Level payment throughout; a negative balance is clamped to zero but a
    /// tiny positive residual may remain
    ClampOnly,
}

/// Configuration for schedule generation
#[derive(Debug, Clone, Default)]
pub struct ScheduleConfig {
    pub reconciliation: Reconciliation,
}

/// Main amortization engine
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: ScheduleConfig,
}

impl AmortizationEngine {
    /// Create a new engine with the given config
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Generate the full schedule for a loan
    pub fn generate(&self, terms: &LoanTerms) -> MortgageResult<Schedule> {
        let payment = level_payment(terms)?;
        let periods = terms.periods()?;
        let rate = terms.periodic_rate();

        let mut schedule = Schedule::new(*terms, payment);
        schedule.records.reserve(periods as usize);
        let mut state = AmortizationState::from_terms(terms);

        for _period in 1..=periods {
            state.advance_period();

            let row = self.calculate_period(&mut state, payment, rate, periods);
            schedule.add_record(row);
        }

        if self.config.reconciliation == Reconciliation::AbsorbResidual {
            debug_assert_eq!(state.eop_balance, 0.0);
            debug_assert!(
                (state.cumulative_principal - terms.principal).abs() <= terms.principal * 1e-9,
                "repaid {} of {}",
                state.cumulative_principal,
                terms.principal
            );
        }

        log::debug!(
            "generated {} payments of {:.2} for principal {:.2} at {}% (interest {:.2})",
            schedule.len(),
            payment,
            terms.principal,
            terms.annual_rate_percent,
            state.cumulative_interest
        );

        Ok(schedule)
    }

    /// Split one payment into interest and principal
    fn calculate_period(
        &self,
        state: &mut AmortizationState,
        payment: f64,
        rate: f64,
        periods: u32,
    ) -> PaymentRecord {
        let mut row = PaymentRecord::new(state.period);

        let interest = state.bop_balance * rate;
        let mut principal = payment - interest;
        let mut amount = payment;

        let is_final = state.period == periods;
        let mut balance = if is_final && self.config.reconciliation == Reconciliation::AbsorbResidual {
            let residual = state.bop_balance - principal;
            log::trace!("final payment absorbs residual {:e}", residual);
            principal = state.bop_balance;
            amount = principal + interest;
            0.0
        } else {
            state.bop_balance - principal
        };

        // Never report a negative balance from overshoot
        if balance < 0.0 {
            balance = 0.0;
        }

        row.payment_amount = amount;
        row.principal_portion = principal;
        row.interest_portion = interest;
        row.remaining_balance = balance;

        state.apply(principal, interest, balance);
        row
    }
}

/// Generate a schedule with the default engine configuration
pub fn generate_schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> MortgageResult<Schedule> {
    let terms = LoanTerms::new(principal, annual_rate_percent, term_years)?;
    AmortizationEngine::default().generate(&terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MortgageError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn standard_schedule() -> Schedule {
        generate_schedule(300_000.0, 4.5, 30).unwrap()
    }

    #[test]
    fn test_schedule_length() {
        assert_eq!(standard_schedule().len(), 360);
        assert_eq!(generate_schedule(50_000.0, 6.0, 1).unwrap().len(), 12);
        assert_eq!(generate_schedule(500_000.0, 3.25, 40).unwrap().len(), 480);
    }

    #[test]
    fn test_periods_are_sequential() {
        let schedule = standard_schedule();
        for (idx, record) in schedule.records.iter().enumerate() {
            assert_eq!(record.period, idx as u32 + 1);
        }
    }

    #[test]
    fn test_principal_fully_repaid() {
        for (p, r, t) in [(300_000.0, 4.5, 30), (400_000.0, 5.5, 30), (85_000.0, 9.75, 7)] {
            let schedule = generate_schedule(p, r, t).unwrap();
            let repaid: f64 = schedule.records.iter().map(|r| r.principal_portion).sum();
            assert_relative_eq!(repaid, p, max_relative = 1e-6);
            assert_eq!(schedule.records.last().unwrap().remaining_balance, 0.0);
        }
    }

    #[test]
    fn test_interest_accrues_on_prior_balance() {
        let schedule = standard_schedule();
        let rate = schedule.terms.periodic_rate();
        let mut balance = schedule.terms.principal;

        for record in &schedule.records {
            assert_relative_eq!(record.interest_portion, balance * rate, max_relative = 1e-12);
            assert_relative_eq!(
                record.principal_portion + record.interest_portion,
                record.payment_amount,
                max_relative = 1e-12
            );
            balance = record.remaining_balance;
        }
    }

    #[test]
    fn test_level_payment_until_final_period() {
        let schedule = standard_schedule();
        let (last, rest) = schedule.records.split_last().unwrap();
        assert!(rest.iter().all(|r| r.payment_amount == schedule.monthly_payment));
        // The reconciled final payment differs only by floating-point drift
        assert_abs_diff_eq!(last.payment_amount, schedule.monthly_payment, epsilon = 1e-6);
    }

    #[test]
    fn test_balance_non_increasing() {
        let schedule = standard_schedule();
        let mut prior = schedule.terms.principal;
        for record in &schedule.records {
            assert!(record.remaining_balance <= prior);
            assert!(record.remaining_balance >= 0.0);
            prior = record.remaining_balance;
        }
    }

    #[test]
    fn test_first_payment_split() {
        let schedule = standard_schedule();
        let first = &schedule.records[0];
        assert_relative_eq!(first.interest_portion, 1125.0, max_relative = 1e-12);
        assert_abs_diff_eq!(first.principal_portion, 395.06, epsilon = 0.005);
        assert_abs_diff_eq!(first.remaining_balance, 299_604.94, epsilon = 0.005);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = generate_schedule(120_000.0, 0.0, 10).unwrap();
        assert_relative_eq!(schedule.monthly_payment, 1000.0);
        assert!(schedule.records.iter().all(|r| r.interest_portion == 0.0));
        assert_eq!(schedule.records.last().unwrap().remaining_balance, 0.0);
        assert_abs_diff_eq!(schedule.records[59].remaining_balance, 60_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clamp_only_keeps_level_payment() {
        let engine = AmortizationEngine::new(ScheduleConfig {
            reconciliation: Reconciliation::ClampOnly,
        });
        let terms = LoanTerms::new(300_000.0, 4.5, 30).unwrap();
        let schedule = engine.generate(&terms).unwrap();

        assert!(schedule.records.iter().all(|r| r.payment_amount == schedule.monthly_payment));
        let last = schedule.records.last().unwrap();
        assert!(last.remaining_balance >= 0.0);
        assert_abs_diff_eq!(last.remaining_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_standard_summary() {
        let summary = standard_schedule().summary();
        assert_eq!(summary.periods, 360);
        assert_abs_diff_eq!(summary.monthly_payment, 1520.06, epsilon = 0.005);
        assert_abs_diff_eq!(summary.total_payment, 547_220.13, epsilon = 0.01);
        assert_abs_diff_eq!(summary.total_interest, 247_220.13, epsilon = 0.01);
        assert_eq!(summary.final_balance, 0.0);
    }

    #[test]
    fn test_yearly_views_cover_every_year() {
        let schedule = standard_schedule();
        let balances = schedule.yearly_balances();
        let totals = schedule.yearly_totals();
        assert_eq!(balances.len(), 30);
        assert_eq!(totals.len(), 30);

        // Year-end balance is the twelfth record of the year
        assert_eq!(balances[0].min_remaining_balance, schedule.records[11].remaining_balance);
        assert_abs_diff_eq!(totals[0].interest, 13_400.99, epsilon = 0.005);
        assert_abs_diff_eq!(totals[0].principal, 4_839.68, epsilon = 0.005);

        let repaid: f64 = totals.iter().map(|t| t.principal).sum();
        assert_relative_eq!(repaid, 300_000.0, max_relative = 1e-6);
        assert_eq!(balances.last().unwrap().min_remaining_balance, 0.0);
    }

    #[test]
    fn test_extreme_terms_amortize_to_zero() {
        let schedule = generate_schedule(100_000.0, 1000.0, 100).unwrap();
        assert_eq!(schedule.len(), 1200);
        assert!(schedule.monthly_payment.is_finite());

        let mut prior = schedule.terms.principal;
        for record in &schedule.records {
            assert!(record.payment_amount.is_finite());
            assert!(record.remaining_balance.is_finite());
            assert!(record.remaining_balance <= prior);
            prior = record.remaining_balance;
        }
        assert_eq!(schedule.records.last().unwrap().remaining_balance, 0.0);
        assert_eq!(schedule.summary().final_balance, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let a = standard_schedule();
        let b = standard_schedule();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_invalid_terms_produce_no_schedule() {
        assert!(matches!(
            generate_schedule(300_000.0, 4.5, 0),
            Err(MortgageError::InvalidInput { field: "term_years", .. })
        ));
        assert!(matches!(
            generate_schedule(0.0, 4.5, 30),
            Err(MortgageError::InvalidInput { field: "principal", .. })
        ));
        assert!(matches!(
            generate_schedule(300_000.0, -1.0, 30),
            Err(MortgageError::InvalidInput { field: "annual_rate_percent", .. })
        ));
    }

    #[test]
    fn test_engine_revalidates_hand_built_terms() {
        let terms = LoanTerms {
            principal: -1.0,
            annual_rate_percent: 4.5,
            term_years: 30,
        };
        assert!(AmortizationEngine::default().generate(&terms).is_err());
    }
}
