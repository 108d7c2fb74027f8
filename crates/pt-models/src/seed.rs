//! First-start seed data

use chrono::{Duration, NaiveDate, Utc};
use pt_core::config::OffDaySeed;
use pt_core::types::RecordId;

use crate::off_day::OffDay;
use crate::production_entry::ProductionEntry;
use crate::user::{Role, User};

/// Id of the seeded administrator
pub const ADMIN_ID: &str = "1";

/// Users written to an empty store
pub fn initial_users() -> Vec<User> {
    vec![User {
        id: RecordId::from(ADMIN_ID),
        name: "Administrator".to_string(),
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        role: Role::Admin,
        password: "admin123".to_string(),
    }]
}

pub fn initial_off_days(seeds: &[OffDaySeed]) -> Vec<OffDay> {
    seeds.iter().map(OffDay::from).collect()
}

/// Deterministic demo entries for the seven days ending `today`.
///
/// Every process gets one entry per day in the first category; the most
/// recent day is left plan-only so the actual-entry flow has work to show.
pub fn demo_production(
    today: NaiveDate,
    processes: &[String],
    categories: &[String],
) -> Vec<ProductionEntry> {
    let Some(category) = categories.first() else {
        return Vec::new();
    };
    let admin = RecordId::from(ADMIN_ID);
    let mut entries = Vec::new();

    for day in 0..7i64 {
        let date = (today - Duration::days(day)).format("%Y-%m-%d").to_string();
        for (idx, process) in processes.iter().enumerate() {
            let plan = 500 + 100 * idx as u64 + 25 * day as u64;
            let actual = if day == 0 { 0 } else { plan - (plan / 10) * ((day as u64 + idx as u64) % 3) };
            entries.push(ProductionEntry {
                id: RecordId::new(format!("demo-{day}-{idx}")),
                date: date.clone(),
                category: category.clone(),
                process: process.clone(),
                product_name: format!("{process} Lot {}", day + 1),
                plan_quantity: plan,
                actual_quantity: actual,
                batch_no: (actual > 0).then(|| format!("B-{}-{:04}", date.replace('-', ""), idx * 7 + day as usize)),
                manpower: (actual > 0).then_some(4 + idx as u32),
                last_updated_by: admin.clone(),
                updated_at: Utc::now(),
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_admin() {
        let users = initial_users();
        assert_eq!(users.len(), 1);
        assert!(users[0].is_admin());
    }

    #[test]
    fn test_demo_production_shape() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let processes = vec!["Mixing".to_string(), "Packing".to_string()];
        let categories = vec!["Softgel".to_string()];
        let entries = demo_production(today, &processes, &categories);

        assert_eq!(entries.len(), 14);
        assert!(entries.iter().filter(|e| e.date == "2025-01-10").all(|e| e.is_plan_only()));
        assert!(entries.iter().filter(|e| e.date == "2025-01-09").all(|e| e.actual_quantity > 0));
        assert!(demo_production(today, &processes, &[]).is_empty());
    }
}
