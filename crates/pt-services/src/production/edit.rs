//! Edit existing entries

use pt_contracts::production::{EditEntryContract, EntryEdit};
use pt_contracts::Contract;
use pt_core::error::{PtError, PtResult};
use pt_core::types::normalize_date;
use pt_models::{actions, EntryMode, Permission, ProductionEntry, User};
use pt_store::RecordStore;
use tracing::info;

use crate::base::{authorize, record_activity};

pub struct EditEntryService<'a> {
    store: &'a RecordStore,
}

impl<'a> EditEntryService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Rewrite an entry's fields. The quantity lands on the plan or the
    /// actual side depending on `mode`; the other side is kept.
    ///
    /// Unlike new plans and actuals, edits may target an off-day.
    pub fn call(&self, actor: &User, id: &str, params: EntryEdit) -> PtResult<ProductionEntry> {
        authorize(actor, Permission::EditEntry)?;
        EditEntryContract.validate(&params)?;

        let date = normalize_date(&params.date);
        let quantity = params.quantity.unwrap_or_default();

        let (updated, _mirror) = self.store.update_entries(|entries| {
            let entry = entries
                .iter_mut()
                .find(|e| e.id.matches(id))
                .ok_or_else(|| PtError::not_found("ProductionEntry", "id", id))?;

            entry.date = date;
            entry.category = params.category.trim().to_string();
            entry.process = params.process.trim().to_string();
            entry.product_name = params.product_name.trim().to_string();
            match params.mode {
                EntryMode::Plan => entry.plan_quantity = quantity,
                EntryMode::Actual => entry.actual_quantity = quantity,
            }
            entry.batch_no = params
                .batch_no
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty());
            entry.manpower = params.manpower;
            entry.touch(&actor.id);
            Ok(entry.clone())
        })?;

        info!(id = %updated.id, mode = ?params.mode, "Entry edited");
        record_activity(
            self.store,
            actor,
            actions::EDIT_RECORD,
            format!("Edited {} on {}", updated.product_name, updated.date),
        );
        Ok(updated)
    }
}
