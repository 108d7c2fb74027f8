//! Off-day management

use pt_contracts::off_days::AddOffDayContract;
use pt_contracts::Contract;
use pt_core::error::{PtError, PtResult};
use pt_core::traits::sort_by_date_desc;
use pt_core::types::normalize_date;
use pt_models::{actions, OffDay, Permission, User};
use pt_store::RecordStore;
use tracing::info;

use crate::base::{authorize, record_activity};

pub struct OffDayService<'a> {
    store: &'a RecordStore,
}

impl<'a> OffDayService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Off-days, newest first
    pub fn list(&self) -> PtResult<Vec<OffDay>> {
        let mut off_days = self.store.off_days()?;
        sort_by_date_desc(&mut off_days);
        Ok(off_days)
    }

    pub fn is_off_day(&self, date: &str) -> PtResult<bool> {
        let date = normalize_date(date);
        Ok(OffDay::find(&self.store.off_days()?, &date).is_some())
    }

    pub fn add(&self, actor: &User, off_day: OffDay) -> PtResult<OffDay> {
        authorize(actor, Permission::ManageOffDays)?;

        let off_day = OffDay::new(normalize_date(&off_day.date), off_day.description.trim());
        let (added, _mirror) = self.store.update_off_days(|off_days| {
            AddOffDayContract::new(off_days).validate(&off_day)?;
            off_days.push(off_day.clone());
            Ok(off_day)
        })?;

        info!(date = %added.date, "Off-day added");
        record_activity(
            self.store,
            actor,
            actions::ADD_OFF_DAY,
            format!("Marked {} as off-day: {}", added.date, added.description),
        );
        Ok(added)
    }

    pub fn remove(&self, actor: &User, date: &str) -> PtResult<OffDay> {
        authorize(actor, Permission::ManageOffDays)?;

        let date = normalize_date(date);
        let (removed, _mirror) = self.store.update_off_days(|off_days| {
            let index = off_days
                .iter()
                .position(|o| o.date == date)
                .ok_or_else(|| PtError::not_found("OffDay", "date", &date))?;
            Ok(off_days.remove(index))
        })?;

        info!(date = %removed.date, "Off-day removed");
        record_activity(
            self.store,
            actor,
            actions::REMOVE_OFF_DAY,
            format!("Removed off-day {} ({})", removed.date, removed.description),
        );
        Ok(removed)
    }
}
