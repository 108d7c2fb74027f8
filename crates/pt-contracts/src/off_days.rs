//! Contract for off-days

use pt_core::error::ValidationErrors;
use pt_core::types::is_valid_iso_date;
use pt_models::OffDay;

use crate::base::{require_present, Contract, ValidationResult};

/// Contract for adding an off-day; one off-day per date
pub struct AddOffDayContract<'a> {
    existing: &'a [OffDay],
}

impl<'a> AddOffDayContract<'a> {
    pub fn new(existing: &'a [OffDay]) -> Self {
        Self { existing }
    }
}

impl Contract<OffDay> for AddOffDayContract<'_> {
    fn validate(&self, input: &OffDay) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if !is_valid_iso_date(&input.date) {
            errors.add("date", "must be a YYYY-MM-DD calendar date");
        } else if OffDay::find(self.existing, &input.date).is_some() {
            errors.add("date", "is already marked as an off-day");
        }
        require_present("description", &input.description, &mut errors);

        errors.into_result()
    }
}
