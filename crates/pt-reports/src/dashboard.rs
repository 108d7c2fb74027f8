//! Monthly dashboard aggregation
//!
//! All figures are derived from the flat production list for one category
//! and one `YYYY-MM` month. Category matching is exact.

use std::collections::BTreeMap;

use pt_core::traits::sort_by_date_desc;
use pt_core::types::{display_date, MonthKey};
use pt_models::{OffDay, ProductionEntry};
use serde::Serialize;

/// `actual / plan * 100`, or `0.0` when nothing was planned
pub fn efficiency(actual: u64, plan: u64) -> f64 {
    if plan == 0 {
        0.0
    } else {
        actual as f64 * 100.0 / plan as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub plan: u64,
    pub actual: u64,
    pub efficiency: f64,
}

/// Plan and actual for one process over the month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRow {
    pub process: String,
    pub plan: u64,
    pub actual: u64,
    pub efficiency: f64,
}

/// One calendar day of the month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGroup {
    pub date: String,
    pub display_date: String,
    pub total_actual: u64,
    pub entries: Vec<ProductionEntry>,
    /// Off-day description when the date is a holiday
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDashboard {
    pub category: String,
    pub month: MonthKey,
    pub totals: MonthTotals,
    /// Known processes first, in their configured order, then any others
    /// in the order they first appear in the collection
    pub processes: Vec<ProcessRow>,
    /// Newest day first
    pub daily: Vec<DailyGroup>,
    /// Every entry of the category across all months, newest first
    pub entries: Vec<ProductionEntry>,
}

impl MonthlyDashboard {
    pub fn build(
        entries: &[ProductionEntry],
        off_days: &[OffDay],
        category: &str,
        month: &MonthKey,
        known_processes: &[String],
    ) -> Self {
        let mut relevant: Vec<ProductionEntry> = entries
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect();
        sort_by_date_desc(&mut relevant);

        let mut processes: Vec<ProcessRow> = known_processes
            .iter()
            .map(|p| ProcessRow {
                process: p.clone(),
                plan: 0,
                actual: 0,
                efficiency: 0.0,
            })
            .collect();
        let mut totals_plan: u64 = 0;
        let mut totals_actual: u64 = 0;
        let mut days: BTreeMap<String, DailyGroup> = BTreeMap::new();

        for entry in entries
            .iter()
            .filter(|e| e.category == category && e.in_month(month))
        {
            totals_plan = totals_plan.saturating_add(entry.plan_quantity);
            totals_actual = totals_actual.saturating_add(entry.actual_quantity);

            let row = match processes.iter().position(|r| r.process == entry.process) {
                Some(idx) => &mut processes[idx],
                None => {
                    processes.push(ProcessRow {
                        process: entry.process.clone(),
                        plan: 0,
                        actual: 0,
                        efficiency: 0.0,
                    });
                    let last = processes.len() - 1;
                    &mut processes[last]
                }
            };
            row.plan = row.plan.saturating_add(entry.plan_quantity);
            row.actual = row.actual.saturating_add(entry.actual_quantity);
        }

        for entry in relevant.iter().filter(|e| e.in_month(month)) {
            let day = days
                .entry(entry.date.clone())
                .or_insert_with(|| empty_day(&entry.date));
            day.total_actual = day.total_actual.saturating_add(entry.actual_quantity);
            day.entries.push(entry.clone());
        }

        for row in &mut processes {
            row.efficiency = efficiency(row.actual, row.plan);
        }

        for off_day in off_days.iter().filter(|o| month.contains(&o.date)) {
            days.entry(off_day.date.clone())
                .or_insert_with(|| empty_day(&off_day.date))
                .off_day = Some(off_day.description.clone());
        }

        let daily = days.into_values().rev().collect();

        Self {
            category: category.to_string(),
            month: month.clone(),
            totals: MonthTotals {
                plan: totals_plan,
                actual: totals_actual,
                efficiency: efficiency(totals_actual, totals_plan),
            },
            processes,
            daily,
            entries: relevant,
        }
    }

    /// Any process has a non-zero plan or actual this month
    pub fn has_activity(&self) -> bool {
        self.processes.iter().any(|p| p.plan > 0 || p.actual > 0)
    }

    pub fn process(&self, name: &str) -> Option<&ProcessRow> {
        self.processes.iter().find(|p| p.process == name)
    }
}

fn empty_day(date: &str) -> DailyGroup {
    DailyGroup {
        date: date.to_string(),
        display_date: display_date(date),
        total_actual: 0,
        entries: Vec::new(),
        off_day: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_models::RecordId;

    fn known() -> Vec<String> {
        ["Mixing", "Encapsulation", "Drying", "Polishing", "Packing"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn entry(date: &str, category: &str, process: &str, plan: u64, actual: u64) -> ProductionEntry {
        let mut e = ProductionEntry::plan(date, category, process, "Fish Oil", plan, RecordId::from("1"));
        e.actual_quantity = actual;
        e
    }

    fn month(value: &str) -> MonthKey {
        MonthKey::parse(value).unwrap()
    }

    #[test]
    fn test_efficiency() {
        assert_eq!(efficiency(50, 0), 0.0);
        assert_eq!(efficiency(0, 0), 0.0);
        assert_eq!(efficiency(120, 100), 120.0);
        assert_eq!(efficiency(80, 100), 80.0);
    }

    #[test]
    fn test_single_mixing_entry() {
        let entries = vec![entry("2025-01-05", "A", "Mixing", 100, 80)];
        let dashboard = MonthlyDashboard::build(&entries, &[], "A", &month("2025-01"), &known());

        assert_eq!(dashboard.totals.plan, 100);
        assert_eq!(dashboard.totals.actual, 80);
        assert_eq!(dashboard.totals.efficiency, 80.0);

        let mixing = dashboard.process("Mixing").unwrap();
        assert_eq!((mixing.plan, mixing.actual), (100, 80));
        for other in ["Encapsulation", "Drying", "Polishing", "Packing"] {
            let row = dashboard.process(other).unwrap();
            assert_eq!((row.plan, row.actual), (0, 0));
        }
        assert!(dashboard.has_activity());
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let entries = vec![
            entry("2025-01-05", "A", "Mixing", u64::MAX, u64::MAX),
            entry("2025-01-05", "A", "Mixing", 1, 1),
        ];
        let dashboard = MonthlyDashboard::build(&entries, &[], "A", &month("2025-01"), &known());

        assert_eq!(dashboard.totals.plan, u64::MAX);
        assert_eq!(dashboard.totals.actual, u64::MAX);
        assert_eq!(dashboard.process("Mixing").unwrap().plan, u64::MAX);
        assert_eq!(dashboard.daily[0].total_actual, u64::MAX);
    }

    #[test]
    fn test_known_processes_always_present() {
        let dashboard = MonthlyDashboard::build(&[], &[], "A", &month("2025-01"), &known());
        let names: Vec<&str> = dashboard.processes.iter().map(|p| p.process.as_str()).collect();
        assert_eq!(names, ["Mixing", "Encapsulation", "Drying", "Polishing", "Packing"]);
        assert!(!dashboard.has_activity());
        assert_eq!(dashboard.totals.efficiency, 0.0);
    }

    #[test]
    fn test_unknown_processes_appended_in_collection_order() {
        let entries = vec![
            entry("2025-01-07", "A", "Coating", 10, 0),
            entry("2025-01-02", "A", "Labelling", 10, 0),
            entry("2025-01-03", "A", "Coating", 5, 0),
        ];
        let dashboard = MonthlyDashboard::build(&entries, &[], "A", &month("2025-01"), &known());
        let extra: Vec<&str> = dashboard.processes[5..].iter().map(|p| p.process.as_str()).collect();
        assert_eq!(extra, ["Coating", "Labelling"]);
        assert_eq!(dashboard.process("Coating").unwrap().plan, 15);
    }

    #[test]
    fn test_filters_category_and_month() {
        let entries = vec![
            entry("2025-01-05", "A", "Mixing", 100, 80),
            entry("2025-01-05", "B", "Mixing", 999, 999),
            entry("2025-02-01", "A", "Mixing", 50, 50),
        ];
        let dashboard = MonthlyDashboard::build(&entries, &[], "A", &month("2025-01"), &known());

        assert_eq!(dashboard.totals.plan, 100);
        assert_eq!(dashboard.daily.len(), 1);
        // the list view spans every month of the category
        assert_eq!(dashboard.entries.len(), 2);
        assert_eq!(dashboard.entries[0].date, "2025-02-01");
    }

    #[test]
    fn test_daily_groups_with_off_days() {
        let entries = vec![
            entry("2025-01-05", "A", "Mixing", 100, 80),
            entry("2025-01-05", "A", "Packing", 100, 20),
            entry("2025-01-10", "A", "Mixing", 100, 0),
        ];
        let off_days = vec![
            OffDay::new("2025-01-01", "New Year"),
            OffDay::new("2025-01-05", "Stocktake"),
            OffDay::new("2025-02-01", "Outside month"),
        ];
        let dashboard = MonthlyDashboard::build(&entries, &off_days, "A", &month("2025-01"), &known());

        let dates: Vec<&str> = dashboard.daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2025-01-10", "2025-01-05", "2025-01-01"]);

        let fifth = &dashboard.daily[1];
        assert_eq!(fifth.total_actual, 100);
        assert_eq!(fifth.entries.len(), 2);
        assert_eq!(fifth.off_day.as_deref(), Some("Stocktake"));
        assert_eq!(fifth.display_date, "2025-01-05 SUNDAY");

        let new_year = &dashboard.daily[2];
        assert!(new_year.entries.is_empty());
        assert_eq!(new_year.total_actual, 0);
        assert_eq!(new_year.off_day.as_deref(), Some("New Year"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let entries = vec![entry("2025-01-05", "A", "Mixing", 100, 80)];
        let dashboard = MonthlyDashboard::build(&entries, &[], "A", &month("2025-01"), &known());
        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["month"], "2025-01");
        assert_eq!(json["daily"][0]["totalActual"], 80);
        assert!(json["daily"][0].get("offDay").is_none());
    }
}
