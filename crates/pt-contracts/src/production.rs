//! Contracts for production entries
//!
//! New plans and new actuals are refused on off-days. Edits of existing
//! entries are not, so a record can still be corrected after a date has
//! been declared a holiday.

use pt_core::error::ValidationErrors;
use pt_core::types::{is_valid_iso_date, normalize_date, RecordId};
use pt_models::{EntryMode, OffDay};
use serde::Deserialize;

use crate::base::{require_present, Contract, ValidationResult};

/// Input for a new plan entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub date: String,
    pub category: String,
    pub process: String,
    pub product_name: String,
    pub quantity: Option<u64>,
}

/// Input for recording actual output against an existing plan
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActual {
    pub date: String,
    pub plan_id: Option<RecordId>,
    pub actual_quantity: Option<u64>,
    pub manpower: Option<u32>,
    pub batch_no: Option<String>,
}

/// Input for editing an existing entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEdit {
    pub date: String,
    pub category: String,
    pub process: String,
    pub product_name: String,
    /// Written to the plan or actual quantity depending on `mode`
    pub quantity: Option<u64>,
    pub mode: EntryMode,
    pub batch_no: Option<String>,
    pub manpower: Option<u32>,
}

fn validate_date(date: &str, errors: &mut ValidationErrors) -> bool {
    if date.trim().is_empty() {
        errors.add("date", "can't be blank");
        false
    } else if !is_valid_iso_date(&normalize_date(date)) {
        errors.add("date", "must be a YYYY-MM-DD calendar date");
        false
    } else {
        true
    }
}

/// Contract for creating plan entries
pub struct CreatePlanContract<'a> {
    off_days: &'a [OffDay],
}

impl<'a> CreatePlanContract<'a> {
    pub fn new(off_days: &'a [OffDay]) -> Self {
        Self { off_days }
    }
}

impl Contract<NewPlan> for CreatePlanContract<'_> {
    fn validate(&self, input: &NewPlan) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if validate_date(&input.date, &mut errors)
            && OffDay::find(self.off_days, &normalize_date(&input.date)).is_some()
        {
            errors.add_base("Selected date is marked as an Off Day.");
            return Err(errors);
        }

        if input.product_name.trim().is_empty() || input.quantity.is_none() {
            errors.add_base("Please fill all required fields.");
        }
        require_present("productName", &input.product_name, &mut errors);
        require_present("category", &input.category, &mut errors);
        require_present("process", &input.process, &mut errors);
        if input.quantity.is_none() {
            errors.add("quantity", "can't be blank");
        }

        errors.into_result()
    }
}

/// Contract for recording actuals
pub struct RecordActualContract<'a> {
    off_days: &'a [OffDay],
}

impl<'a> RecordActualContract<'a> {
    pub fn new(off_days: &'a [OffDay]) -> Self {
        Self { off_days }
    }
}

impl Contract<RecordActual> for RecordActualContract<'_> {
    fn validate(&self, input: &RecordActual) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if validate_date(&input.date, &mut errors)
            && OffDay::find(self.off_days, &normalize_date(&input.date)).is_some()
        {
            errors.add_base("Cannot enter data on an Off Day.");
            return Err(errors);
        }

        if input.plan_id.is_none() {
            errors.add_base("Please select a production plan to update.");
        }
        if input.actual_quantity.is_none() {
            errors.add("actualQuantity", "can't be blank");
        }

        errors.into_result()
    }
}

/// Contract for editing entries
#[derive(Default)]
pub struct EditEntryContract;

impl Contract<EntryEdit> for EditEntryContract {
    fn validate(&self, input: &EntryEdit) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        validate_date(&input.date, &mut errors);
        require_present("productName", &input.product_name, &mut errors);
        require_present("category", &input.category, &mut errors);
        require_present("process", &input.process, &mut errors);
        if input.quantity.is_none() {
            errors.add("quantity", "can't be blank");
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn off_days() -> Vec<OffDay> {
        vec![OffDay::new("2025-05-01", "Labour Day")]
    }

    fn plan(date: &str) -> NewPlan {
        NewPlan {
            date: date.into(),
            category: "Softgel".into(),
            process: "Mixing".into(),
            product_name: "Fish Oil".into(),
            quantity: Some(100),
        }
    }

    #[test]
    fn test_valid_plan() {
        let days = off_days();
        assert!(CreatePlanContract::new(&days).validate(&plan("2025-05-02")).is_ok());
    }

    #[test]
    fn test_plan_on_off_day_rejected() {
        let days = off_days();
        let errors = CreatePlanContract::new(&days)
            .validate(&plan("2025-05-01"))
            .unwrap_err();
        assert_eq!(errors.base_errors, vec!["Selected date is marked as an Off Day.".to_string()]);
    }

    #[test]
    fn test_plan_requires_product_and_quantity() {
        let days = off_days();
        let mut input = plan("2025-05-02");
        input.product_name = String::new();
        input.quantity = None;
        let errors = CreatePlanContract::new(&days).validate(&input).unwrap_err();
        assert!(errors.has_error("productName"));
        assert!(errors.has_error("quantity"));
        assert!(errors.base_errors.contains(&"Please fill all required fields.".to_string()));
    }

    #[test]
    fn test_plan_rejects_bad_date() {
        let days = off_days();
        let errors = CreatePlanContract::new(&days)
            .validate(&plan("05/02/2025"))
            .unwrap_err();
        assert!(errors.has_error("date"));
    }

    #[test]
    fn test_actual_requires_plan_selection() {
        let days = off_days();
        let input = RecordActual {
            date: "2025-05-02".into(),
            plan_id: None,
            actual_quantity: Some(10),
            ..Default::default()
        };
        let errors = RecordActualContract::new(&days).validate(&input).unwrap_err();
        assert_eq!(errors.base_errors, vec!["Please select a production plan to update.".to_string()]);
    }

    #[test]
    fn test_actual_on_off_day_rejected() {
        let days = off_days();
        let input = RecordActual {
            date: "2025-05-01".into(),
            plan_id: Some(RecordId::from("1")),
            actual_quantity: Some(10),
            ..Default::default()
        };
        let errors = RecordActualContract::new(&days).validate(&input).unwrap_err();
        assert_eq!(errors.base_errors, vec!["Cannot enter data on an Off Day.".to_string()]);
    }

    #[test]
    fn test_edit_allowed_on_off_day() {
        let input = EntryEdit {
            date: "2025-05-01".into(),
            category: "Softgel".into(),
            process: "Mixing".into(),
            product_name: "Fish Oil".into(),
            quantity: Some(90),
            mode: EntryMode::Actual,
            batch_no: None,
            manpower: Some(3),
        };
        assert!(EditEntryContract.validate(&input).is_ok());
    }
}
