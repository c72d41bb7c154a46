//! Exports and chart-ready views built on top of a schedule

mod csv_export;
mod views;

pub use csv_export::{SCHEDULE_HEADER, write_schedule, export_schedule, schedule_to_csv};
pub use views::{
    BalancePoint, PaymentBreakdown, balance_points, payment_breakdown, first_year, format_currency,
};
