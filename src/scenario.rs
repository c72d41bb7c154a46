//! Scenario runner for batches of loans
//!
//! Holds one engine configuration and evaluates many loan terms against it.
//! Each loan is independent, so batches run in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::amortization::{AmortizationEngine, Schedule, ScheduleConfig, ScheduleSummary};
use crate::config::InputLimits;
use crate::error::MortgageResult;
use crate::loan::{LabeledLoan, LoanTerms};

/// Outcome for one loan of a batch
#[derive(Debug, Serialize)]
pub struct ScenarioOutcome {
    pub label: String,
    pub terms: LoanTerms,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScheduleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runner for batch and sensitivity evaluations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new().with_limits(InputLimits::default());
/// for outcome in runner.run_rates(300_000.0, 30, &[4.0, 4.5, 5.0]) {
///     println!("{}: {:?}", outcome.label, outcome.summary);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: AmortizationEngine,
    limits: Option<InputLimits>,
}

impl ScenarioRunner {
    /// Create runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific engine configuration
    pub fn with_config(config: ScheduleConfig) -> Self {
        Self {
            engine: AmortizationEngine::new(config),
            limits: None,
        }
    }

    /// Reject every loan outside these limits before generating its schedule
    pub fn with_limits(mut self, limits: InputLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Generate a single schedule
    pub fn run(&self, terms: &LoanTerms) -> MortgageResult<Schedule> {
        if let Some(limits) = &self.limits {
            limits.check(terms)?;
        }
        self.engine.generate(terms)
    }

    /// Summarize every loan of a batch in parallel, preserving input order
    ///
    /// Invalid or out-of-range terms are reported on their own outcome and
    /// never abort the batch.
    pub fn run_batch(&self, loans: &[LabeledLoan]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = loans
            .par_iter()
            .map(|loan| self.outcome(loan.label.clone(), loan.terms))
            .collect();

        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        if failed > 0 {
            log::warn!("{} of {} loans were rejected", failed, outcomes.len());
        }
        outcomes
    }

    /// Evaluate one principal and term across several annual rates
    pub fn run_rates(&self, principal: f64, term_years: u32, rates: &[f64]) -> Vec<ScenarioOutcome> {
        rates
            .par_iter()
            .map(|&rate| {
                let terms = LoanTerms {
                    principal,
                    annual_rate_percent: rate,
                    term_years,
                };
                self.outcome(format!("{rate}%"), terms)
            })
            .collect()
    }

    fn outcome(&self, label: String, terms: LoanTerms) -> ScenarioOutcome {
        match self.run(&terms) {
            Ok(schedule) => ScenarioOutcome {
                label,
                terms,
                summary: Some(schedule.summary()),
                error: None,
            },
            Err(e) => ScenarioOutcome {
                label,
                terms,
                summary: None,
                error: Some(e.to_string()),
            },
        }
    }
}
