//! Create plan entries

use pt_contracts::production::{CreatePlanContract, NewPlan};
use pt_contracts::Contract;
use pt_core::error::PtResult;
use pt_core::types::normalize_date;
use pt_models::{actions, Permission, ProductionEntry, User};
use pt_store::RecordStore;
use tracing::info;

use crate::base::{authorize, record_activity};

/// Service for planning production
pub struct PlanService<'a> {
    store: &'a RecordStore,
}

impl<'a> PlanService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Add a plan-only entry. Off-days are refused.
    pub fn create(&self, actor: &User, params: NewPlan) -> PtResult<ProductionEntry> {
        authorize(actor, Permission::AddPlan)?;

        let off_days = self.store.off_days()?;
        CreatePlanContract::new(&off_days).validate(&params)?;

        let quantity = params.quantity.unwrap_or_default();
        let entry = ProductionEntry::plan(
            normalize_date(&params.date),
            params.category.trim(),
            params.process.trim(),
            params.product_name.trim(),
            quantity,
            actor.id.clone(),
        );

        self.store.update_entries(|entries| {
            entries.push(entry.clone());
            Ok(())
        })?;

        info!(id = %entry.id, date = %entry.date, "Plan created");
        record_activity(
            self.store,
            actor,
            actions::ADD_PLAN,
            format!("Planned {} for {} on {}", quantity, entry.product_name, entry.date),
        );
        Ok(entry)
    }
}
