//! CSV production report

use pt_core::error::{PtError, PtResult};
use pt_core::types::MonthKey;
use pt_models::ProductionEntry;

const HEADERS: [&str; 7] = ["Date", "Process", "Product", "Plan", "Actual", "Batch No", "Manpower"];

/// Render entries as CSV, one row per entry in the order given.
///
/// Missing batch numbers and manpower become empty cells.
pub fn export_csv(entries: &[ProductionEntry]) -> PtResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS).map_err(csv_error)?;

    for entry in entries {
        let plan = entry.plan_quantity.to_string();
        let actual = entry.actual_quantity.to_string();
        let manpower = entry.manpower.map(|m| m.to_string()).unwrap_or_default();
        writer
            .write_record([
                entry.date.as_str(),
                entry.process.as_str(),
                entry.product_name.as_str(),
                plan.as_str(),
                actual.as_str(),
                entry.batch_no.as_deref().unwrap_or(""),
                manpower.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PtError::Internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| PtError::Internal(format!("CSV is not UTF-8: {e}")))
}

/// Download name, e.g. `Report_Softgel_2025-01.csv`
pub fn report_file_name(category: &str, month: &MonthKey) -> String {
    let category: String = category
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("Report_{category}_{month}.csv")
}

fn csv_error(e: csv::Error) -> PtError {
    PtError::Internal(format!("CSV write failed: {e}"))
}
