//! Production entry model
//!
//! One row per date/category/process/product. Plan and actual quantities are
//! set independently; an entry whose actual is zero is "plan only".

use chrono::{DateTime, Utc};
use pt_core::traits::{Dated, Identifiable};
use pt_core::types::{MonthKey, RecordId};
use serde::{Deserialize, Serialize};

use crate::cells;

/// Production entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    pub id: RecordId,

    /// Calendar date, `YYYY-MM-DD`; never a timestamp
    pub date: String,

    pub category: String,

    /// Opaque process name (e.g. "Mixing")
    pub process: String,

    pub product_name: String,

    #[serde(deserialize_with = "cells::quantity")]
    pub plan_quantity: u64,

    #[serde(default, deserialize_with = "cells::quantity")]
    pub actual_quantity: u64,

    #[serde(
        default,
        deserialize_with = "cells::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub batch_no: Option<String>,

    #[serde(
        default,
        deserialize_with = "cells::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub manpower: Option<u32>,

    /// Id of the user who last touched the entry
    pub last_updated_by: RecordId,

    pub updated_at: DateTime<Utc>,
}

/// Which quantity an edit writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    Plan,
    Actual,
}

impl ProductionEntry {
    /// New plan-only entry
    pub fn plan(
        date: impl Into<String>,
        category: impl Into<String>,
        process: impl Into<String>,
        product_name: impl Into<String>,
        plan_quantity: u64,
        updated_by: RecordId,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            date: date.into(),
            category: category.into(),
            process: process.into(),
            product_name: product_name.into(),
            plan_quantity,
            actual_quantity: 0,
            batch_no: None,
            manpower: None,
            last_updated_by: updated_by,
            updated_at: Utc::now(),
        }
    }

    pub fn is_plan_only(&self) -> bool {
        self.actual_quantity == 0
    }

    /// Mode an editor should open this entry in
    pub fn edit_mode(&self) -> EntryMode {
        if self.actual_quantity > 0 {
            EntryMode::Actual
        } else {
            EntryMode::Plan
        }
    }

    pub fn in_month(&self, month: &MonthKey) -> bool {
        month.contains(&self.date)
    }

    /// Stamp the entry as modified by `user_id`
    pub fn touch(&mut self, user_id: &RecordId) {
        self.last_updated_by = user_id.clone();
        self.updated_at = Utc::now();
    }
}

impl Identifiable for ProductionEntry {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Dated for ProductionEntry {
    fn date(&self) -> &str {
        &self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_entry_defaults() {
        let entry = ProductionEntry::plan("2025-01-05", "Softgel", "Mixing", "Fish Oil", 100, RecordId::from("u1"));
        assert!(entry.is_plan_only());
        assert_eq!(entry.edit_mode(), EntryMode::Plan);
        assert!(entry.in_month(&MonthKey::parse("2025-01").unwrap()));
        assert!(!entry.in_month(&MonthKey::parse("2025-02").unwrap()));
    }

    #[test]
    fn test_deserializes_remote_shape() {
        let json = r#"{
            "id": 1736035200000,
            "date": "2025-01-05",
            "category": "Softgel",
            "process": "Mixing",
            "productName": "Fish Oil",
            "planQuantity": 100,
            "actualQuantity": 80,
            "batchNo": "B-20250105-42",
            "lastUpdatedBy": "1",
            "updatedAt": "2025-01-05T10:00:00.000Z"
        }"#;
        let entry: ProductionEntry = serde_json::from_str(json).unwrap();
        assert!(entry.has_id("1736035200000"));
        assert_eq!(entry.actual_quantity, 80);
        assert_eq!(entry.manpower, None);
        assert_eq!(entry.edit_mode(), EntryMode::Actual);
    }

    #[test]
    fn test_serializes_camel_case() {
        let entry = ProductionEntry::plan("2025-01-05", "Softgel", "Mixing", "Fish Oil", 100, RecordId::from("u1"));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["productName"], "Fish Oil");
        assert_eq!(value["planQuantity"], 100);
        assert!(value.get("batchNo").is_none());
    }
}
