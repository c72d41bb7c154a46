//! Load batches of loan terms from CSV

use super::LoanTerms;
use crate::error::MortgageResult;
use csv::Reader;
use serde::Serialize;
use std::path::Path;

/// Raw CSV row: `principal,annual_rate_percent,term_years[,label]`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
}

/// A loan read from a batch file, with an optional caller-supplied label
#[derive(Debug, Clone, Serialize)]
pub struct LabeledLoan {
    pub label: String,
    pub terms: LoanTerms,
}

impl CsvRow {
    fn into_loan(self, line: usize) -> LabeledLoan {
        LabeledLoan {
            label: self.label.unwrap_or_else(|| format!("row {line}")),
            // Validation happens when the loan is run so one bad row does not
            // hide the rest of the batch.
            terms: LoanTerms {
                principal: self.principal,
                annual_rate_percent: self.annual_rate_percent,
                term_years: self.term_years,
            },
        }
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> MortgageResult<Vec<LabeledLoan>> {
    let reader = Reader::from_path(path)?;
    collect_loans(reader)
}

/// Load loans from any reader (e.g., string buffer, request body)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> MortgageResult<Vec<LabeledLoan>> {
    collect_loans(Reader::from_reader(reader))
}

fn collect_loans<R: std::io::Read>(mut reader: Reader<R>) -> MortgageResult<Vec<LabeledLoan>> {
    let mut loans = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        loans.push(row.into_loan(idx + 1));
    }

    log::debug!("loaded {} loans", loans.len());
    Ok(loans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_loans_from_reader() {
        let data = "label,principal,annual_rate_percent,term_years\n\
                    starter,300000,4.5,30\n\
                    ,400000,5.5,30\n";
        let loans = load_loans_from_reader(data.as_bytes()).unwrap();

        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].label, "starter");
        assert_eq!(loans[0].terms.term_years, 30);
        assert_eq!(loans[1].label, "row 2");
        assert_eq!(loans[1].terms.principal, 400_000.0);
    }

    #[test]
    fn test_label_column_optional() {
        let data = "principal,annual_rate_percent,term_years\n150000,0,15\n";
        let loans = load_loans_from_reader(data.as_bytes()).unwrap();
        assert_eq!(loans[0].label, "row 1");
        assert_eq!(loans[0].terms.annual_rate_percent, 0.0);
    }

    #[test]
    fn test_malformed_row_is_error() {
        let data = "principal,annual_rate_percent,term_years\nabc,4.5,30\n";
        assert!(load_loans_from_reader(data.as_bytes()).is_err());
    }
}
