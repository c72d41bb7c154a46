//! Mortgage Calculator CLI
//!
//! Command-line interface for payments, schedules and batch runs

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use mortgage_calculator::{
    amortization::{effective_annual_rate_percent, implied_annual_rate_percent},
    loan::load_loans,
    report::{self, format_currency},
    CalculatorConfig, LoanTerms, ScenarioRunner, Schedule,
};

/// Fixed-rate mortgage calculator
#[derive(Parser)]
#[command(name = "mortgage_calculator", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment and lifetime totals
    Payment(LoanArgs),
    /// Summary plus the first year of payments, optionally exporting every payment
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,
        /// Write the full schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Year-end balance and principal/interest paid per year
    Yearly(LoanArgs),
    /// Summaries for every loan in a CSV file (principal,annual_rate_percent,term_years[,label])
    Batch {
        #[arg(long)]
        input: PathBuf,
    },
    /// Compare one loan across several annual rates
    Sensitivity {
        #[command(flatten)]
        loan: LoanArgs,
        /// Annual rates in percent
        #[arg(long, value_delimiter = ',', required = true)]
        rates: Vec<f64>,
    },
}

/// Loan input: either a loan amount, or a home value and deposit
#[derive(Args)]
struct LoanArgs {
    /// Loan amount
    #[arg(long, conflicts_with_all = ["home_value", "deposit"])]
    principal: Option<f64>,
    /// Purchase price; the loan is the home value minus the deposit
    #[arg(long, requires = "deposit")]
    home_value: Option<f64>,
    #[arg(long)]
    deposit: Option<f64>,
    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<f64>,
    /// Loan term in years
    #[arg(long)]
    years: Option<u32>,
}

impl LoanArgs {
    fn terms(&self, config: &CalculatorConfig) -> Result<LoanTerms> {
        let rate = self.rate.unwrap_or(config.annual_rate_percent);
        let years = self.years.unwrap_or(config.term_years);

        let terms = match (self.principal, self.home_value, self.deposit) {
            (Some(principal), _, _) => LoanTerms::new(principal, rate, years)?,
            (None, Some(home_value), Some(deposit)) => {
                LoanTerms::from_home_value(home_value, deposit, rate, years)?
            }
            (None, None, Some(_)) => bail!("--deposit requires --home-value"),
            _ => LoanTerms::new(config.loan_amount, rate, years)?,
        };

        config.check(&terms).context("loan terms outside the calculator's limits")?;
        Ok(terms)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = CalculatorConfig::from_env();
    let runner = ScenarioRunner::new().with_limits(config.limits.clone());

    match cli.command {
        Commands::Payment(loan) => {
            let schedule = runner.run(&loan.terms(&config)?)?;
            print_summary(&schedule, cli.json)?;
        }
        Commands::Schedule { loan, csv } => {
            let schedule = runner.run(&loan.terms(&config)?)?;
            print_summary(&schedule, cli.json)?;
            if !cli.json {
                print_first_year(&schedule);
            }
            if let Some(path) = csv {
                report::export_schedule(&schedule, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("\nFull schedule written to: {}", path.display());
            }
        }
        Commands::Yearly(loan) => {
            let schedule = runner.run(&loan.terms(&config)?)?;
            print_yearly(&schedule, cli.json)?;
        }
        Commands::Batch { input } => {
            let loans = load_loans(&input)
                .with_context(|| format!("failed to load loans from {}", input.display()))?;
            log::info!("running {} loans", loans.len());
            let outcomes = runner.run_batch(&loans);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            } else {
                println!("{:<20} {:>14} {:>8} {:>6} {:>14} {:>16}",
                    "Loan", "Principal", "Rate", "Years", "Monthly", "Total Interest");
                println!("{}", "-".repeat(83));
                for outcome in &outcomes {
                    match (&outcome.summary, &outcome.error) {
                        (Some(s), _) => println!("{:<20} {:>14} {:>7.3}% {:>6} {:>14} {:>16}",
                            outcome.label,
                            format_currency(s.principal),
                            outcome.terms.annual_rate_percent,
                            outcome.terms.term_years,
                            format_currency(s.monthly_payment),
                            format_currency(s.total_interest),
                        ),
                        (None, Some(err)) => println!("{:<20} error: {}", outcome.label, err),
                        (None, None) => {}
                    }
                }
            }
        }
        Commands::Sensitivity { loan, rates } => {
            let terms = loan.terms(&config)?;
            let outcomes = runner.run_rates(terms.principal, terms.term_years, &rates);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            } else {
                println!("{:>8} {:>14} {:>16} {:>16}", "Rate", "Monthly", "Total Paid", "Total Interest");
                for outcome in &outcomes {
                    match (&outcome.summary, &outcome.error) {
                        (Some(s), _) => println!("{:>8} {:>14} {:>16} {:>16}",
                            outcome.label,
                            format_currency(s.monthly_payment),
                            format_currency(s.total_payment),
                            format_currency(s.total_interest),
                        ),
                        (None, Some(err)) => println!("{:>8} error: {}", outcome.label, err),
                        (None, None) => {}
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_summary(schedule: &Schedule, as_json: bool) -> Result<()> {
    let summary = schedule.summary();
    let terms = &schedule.terms;

    if as_json {
        let body = json!({
            "terms": terms,
            "summary": summary,
            "effective_annual_rate_pct": effective_annual_rate_percent(terms.annual_rate_percent),
            "implied_annual_rate_pct": implied_annual_rate_percent(schedule),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Loan: {} at {}% over {} years",
        format_currency(terms.principal), terms.annual_rate_percent, terms.term_years);
    println!("  Monthly Payment: {}", format_currency(summary.monthly_payment));
    println!("  Total Payment:   {}", format_currency(summary.total_payment));
    println!("  Total Interest:  {}", format_currency(summary.total_interest));
    println!("  Effective Rate:  {:.4}%", effective_annual_rate_percent(terms.annual_rate_percent));
    Ok(())
}

fn print_first_year(schedule: &Schedule) {
    println!("\nAmortization Schedule (First Year):");
    println!("{:>5} {:>14} {:>14} {:>14} {:>18}",
        "Month", "Payment", "Principal", "Interest", "Remaining Balance");
    println!("{}", "-".repeat(69));

    for row in report::first_year(schedule) {
        println!("{:>5} {:>14} {:>14} {:>14} {:>18}",
            row.period,
            format_currency(row.payment_amount),
            format_currency(row.principal_portion),
            format_currency(row.interest_portion),
            format_currency(row.remaining_balance),
        );
    }

    if schedule.len() > 12 {
        println!("... ({} more payments)", schedule.len() - 12);
    }
}

fn print_yearly(schedule: &Schedule, as_json: bool) -> Result<()> {
    let balances = schedule.yearly_balances();
    let totals = schedule.yearly_totals();

    if as_json {
        let body = json!({
            "yearly_balances": balances,
            "yearly_totals": totals,
            "balance_points": report::balance_points(schedule),
            "payment_breakdown": report::payment_breakdown(schedule),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{:>4} {:>16} {:>16} {:>18}", "Year", "Principal", "Interest", "Year-End Balance");
    println!("{}", "-".repeat(57));
    for (balance, total) in balances.iter().zip(&totals) {
        println!("{:>4} {:>16} {:>16} {:>18}",
            total.year,
            format_currency(total.principal),
            format_currency(total.interest),
            format_currency(balance.min_remaining_balance),
        );
    }

    let breakdown = report::payment_breakdown(schedule);
    println!("\nInterest share of total cost: {:.1}%", breakdown.interest_share() * 100.0);
    Ok(())
}
