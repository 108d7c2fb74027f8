//! Delete entries

use pt_core::error::{PtError, PtResult};
use pt_models::{actions, Permission, ProductionEntry, User};
use pt_store::RecordStore;
use tracing::info;

use crate::base::{authorize, record_activity};

pub struct DeleteEntryService<'a> {
    store: &'a RecordStore,
}

impl<'a> DeleteEntryService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Remove an entry and return it. An unknown id is `NotFound`.
    pub fn call(&self, actor: &User, id: &str) -> PtResult<ProductionEntry> {
        authorize(actor, Permission::DeleteEntry)?;

        let deletion = self.store.delete_entry(id)?;
        let removed = deletion
            .removed
            .ok_or_else(|| PtError::not_found("ProductionEntry", "id", id))?;

        info!(id = %removed.id, remaining = deletion.remaining.len(), "Entry deleted");
        record_activity(
            self.store,
            actor,
            actions::DELETE_RECORD,
            format!("Deleted {} on {}", removed.product_name, removed.date),
        );
        Ok(removed)
    }
}
