//! Loan terms and batch input loading

mod terms;
pub mod loader;

pub use terms::{LoanTerms, PAYMENTS_PER_YEAR, year_of_period};
pub use loader::{load_loans, load_loans_from_reader, LabeledLoan};
