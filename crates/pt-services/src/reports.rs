//! Read-side views: dashboard, CSV report, activity log

use pt_core::error::PtResult;
use pt_core::types::MonthKey;
use pt_models::{ActivityLog, Permission, User};
use pt_reports::{export_csv, report_file_name, MonthlyDashboard};
use pt_store::RecordStore;
use serde::Serialize;

use crate::base::authorize;

/// A rendered CSV download
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvReport {
    pub file_name: String,
    pub body: String,
}

pub struct ReportService<'a> {
    store: &'a RecordStore,
}

impl<'a> ReportService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn dashboard(&self, actor: &User, category: &str, month: &MonthKey) -> PtResult<MonthlyDashboard> {
        authorize(actor, Permission::ViewDashboard)?;
        Ok(MonthlyDashboard::build(
            &self.store.entries()?,
            &self.store.off_days()?,
            category,
            month,
            &self.store.options().known_processes,
        ))
    }

    /// Every entry of the category, newest first, as CSV
    pub fn export(&self, actor: &User, category: &str, month: &MonthKey) -> PtResult<CsvReport> {
        authorize(actor, Permission::ExportReport)?;
        let dashboard = MonthlyDashboard::build(
            &self.store.entries()?,
            &[],
            category,
            month,
            &self.store.options().known_processes,
        );
        Ok(CsvReport {
            file_name: report_file_name(category, month),
            body: export_csv(&dashboard.entries)?,
        })
    }

    /// Activity log, newest first
    pub fn activity_log(&self, actor: &User) -> PtResult<Vec<ActivityLog>> {
        authorize(actor, Permission::ViewLogs)?;
        self.store.logs()
    }
}
