//! Record actual output against a plan

use pt_contracts::production::{RecordActual, RecordActualContract};
use pt_contracts::Contract;
use pt_core::error::{PtError, PtResult};
use pt_core::types::normalize_date;
use pt_models::{actions, Permission, ProductionEntry, User};
use pt_store::RecordStore;
use rand::Rng;
use tracing::info;

use crate::base::{authorize, record_activity};

/// Suggested batch number for a date: `B-{YYYYMMDD}-{0..9999}`
pub fn generate_batch_no(date: &str) -> String {
    let suffix = rand::rng().random_range(0..10_000);
    format!("B-{}-{}", normalize_date(date).replace('-', ""), suffix)
}

pub struct ActualService<'a> {
    store: &'a RecordStore,
}

impl<'a> ActualService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Entries scheduled on `date`, the plans an operator can pick from
    pub fn plans_for_date(&self, actor: &User, date: &str) -> PtResult<Vec<ProductionEntry>> {
        authorize(actor, Permission::ViewDashboard)?;
        let date = normalize_date(date);
        Ok(self
            .store
            .entries()?
            .into_iter()
            .filter(|e| e.date == date)
            .collect())
    }

    /// Set actual quantity, manpower and batch number on the selected plan
    pub fn record(&self, actor: &User, params: RecordActual) -> PtResult<ProductionEntry> {
        authorize(actor, Permission::AddActual)?;

        let off_days = self.store.off_days()?;
        RecordActualContract::new(&off_days).validate(&params)?;

        let plan_id = params
            .plan_id
            .ok_or_else(|| PtError::invalid("Please select a production plan to update."))?;
        let quantity = params.actual_quantity.unwrap_or_default();
        let batch_no = params
            .batch_no
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        let (updated, _mirror) = self.store.update_entries(|entries| {
            let entry = entries
                .iter_mut()
                .find(|e| e.id.matches(plan_id.as_str()))
                .ok_or_else(|| PtError::not_found("ProductionEntry", "id", &plan_id))?;
            entry.actual_quantity = quantity;
            entry.manpower = params.manpower;
            entry.batch_no = batch_no;
            entry.touch(&actor.id);
            Ok(entry.clone())
        })?;

        info!(id = %updated.id, actual = quantity, "Actual recorded");
        record_activity(
            self.store,
            actor,
            actions::ADD_ACTUAL,
            format!("Updated actuals for {}: {} units", updated.product_name, quantity),
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::production::PlanService;
    use crate::test_support::{admin, store, user_with_role};
    use pt_contracts::production::NewPlan;
    use pt_models::{RecordId, Role};

    fn plan(store: &RecordStore, date: &str) -> ProductionEntry {
        PlanService::new(store)
            .create(
                &admin(),
                NewPlan {
                    date: date.into(),
                    category: "Softgel".into(),
                    process: "Encapsulation".into(),
                    product_name: "Vitamin E".into(),
                    quantity: Some(1000),
                },
            )
            .unwrap()
    }

    #[test]
    fn test_generate_batch_no() {
        let batch = generate_batch_no("2025-03-07");
        assert!(batch.starts_with("B-20250307-"));
        let suffix: u32 = batch.rsplit('-').next().unwrap().parse().unwrap();
        assert!(suffix < 10_000);
    }

    #[test]
    fn test_record_actual() {
        let store = store();
        let planned = plan(&store, "2025-05-02");
        let operator = user_with_role(Role::Operator);

        let updated = ActualService::new(&store)
            .record(
                &operator,
                RecordActual {
                    date: "2025-05-02".into(),
                    plan_id: Some(planned.id.clone()),
                    actual_quantity: Some(950),
                    manpower: Some(6),
                    batch_no: Some("B-20250502-17".into()),
                },
            )
            .unwrap();

        assert_eq!(updated.actual_quantity, 950);
        assert_eq!(updated.manpower, Some(6));
        assert_eq!(updated.batch_no.as_deref(), Some("B-20250502-17"));
        assert_eq!(updated.last_updated_by, operator.id);
        assert_eq!(store.entries().unwrap()[0].actual_quantity, 950);
        assert_eq!(store.logs().unwrap()[0].details, "Updated actuals for Vitamin E: 950 units");
    }

    #[test]
    fn test_unknown_plan_is_not_found() {
        let store = store();
        plan(&store, "2025-05-02");

        let err = ActualService::new(&store)
            .record(
                &admin(),
                RecordActual {
                    date: "2025-05-02".into(),
                    plan_id: Some(RecordId::from("missing")),
                    actual_quantity: Some(1),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.entries().unwrap()[0].is_plan_only());
    }

    #[test]
    fn test_off_day_rejected() {
        let store = store();
        let err = ActualService::new(&store)
            .record(
                &admin(),
                RecordActual {
                    date: "2025-05-01".into(),
                    plan_id: Some(RecordId::from("1")),
                    actual_quantity: Some(1),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("Cannot enter data on an Off Day."));
    }

    #[test]
    fn test_plans_for_date() {
        let store = store();
        plan(&store, "2025-05-02");
        plan(&store, "2025-05-03");

        let plans = ActualService::new(&store)
            .plans_for_date(&admin(), "2025-05-03")
            .unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].date, "2025-05-03");
    }
}
