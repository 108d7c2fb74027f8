//! # pt-reports
//!
//! Read-side views over the production collection: the monthly dashboard
//! and the CSV report.

pub mod csv_export;
pub mod dashboard;

pub use csv_export::{export_csv, report_file_name};
pub use dashboard::{efficiency, DailyGroup, MonthTotals, MonthlyDashboard, ProcessRow};
