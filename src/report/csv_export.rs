//! CSV export of a full schedule

use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::amortization::Schedule;
use crate::error::MortgageResult;

/// Column headers of the exported schedule
pub const SCHEDULE_HEADER: [&str; 6] = [
    "Month",
    "Payment",
    "Principal",
    "Interest",
    "Remaining Balance",
    "Year",
];

/// Write one row per payment, amounts with two decimals
pub fn write_schedule<W: Write>(schedule: &Schedule, writer: W) -> MortgageResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(SCHEDULE_HEADER)?;

    for record in &schedule.records {
        wtr.write_record([
            record.period.to_string(),
            format!("{:.2}", record.payment_amount),
            format!("{:.2}", record.principal_portion),
            format!("{:.2}", record.interest_portion),
            format!("{:.2}", record.remaining_balance),
            record.year.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export a schedule to a file, replacing any existing file
pub fn export_schedule<P: AsRef<Path>>(schedule: &Schedule, path: P) -> MortgageResult<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_schedule(schedule, file)?;
    log::info!("wrote {} payments to {}", schedule.len(), path.as_ref().display());
    Ok(())
}

/// Schedule rendered as CSV bytes (for download responses)
pub fn schedule_to_csv(schedule: &Schedule) -> MortgageResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(schedule.len() * 48);
    write_schedule(schedule, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::generate_schedule;

    #[test]
    fn test_csv_layout() {
        let schedule = generate_schedule(300_000.0, 4.5, 30).unwrap();
        let bytes = schedule_to_csv(&schedule).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 361);
        assert_eq!(lines[0], "Month,Payment,Principal,Interest,Remaining Balance,Year");
        assert_eq!(lines[1], "1,1520.06,395.06,1125.00,299604.94,1");
        assert!(lines[360].starts_with("360,1520.06,"));
        assert!(lines[360].ends_with(",0.00,30"));
    }

    #[test]
    fn test_csv_reads_back() {
        let schedule = generate_schedule(24_000.0, 0.0, 2).unwrap();
        let bytes = schedule_to_csv(&schedule).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 24);
        assert_eq!(&rows[11][4], "12000.00");
        assert_eq!(&rows[12][5], "2");
    }
}
