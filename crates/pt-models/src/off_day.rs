//! Off-day model
//!
//! A calendar date marked as non-working. New plan and actual entries are
//! refused on off-days; at most one off-day exists per date.

use pt_core::config::OffDaySeed;
use pt_core::traits::Dated;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
}

impl OffDay {
    pub fn new(date: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
        }
    }

    /// Find the off-day for a date, if any
    pub fn find<'a>(off_days: &'a [OffDay], date: &str) -> Option<&'a OffDay> {
        off_days.iter().find(|d| d.date == date)
    }
}

impl Dated for OffDay {
    fn date(&self) -> &str {
        &self.date
    }
}

impl From<&OffDaySeed> for OffDay {
    fn from(seed: &OffDaySeed) -> Self {
        Self::new(seed.date.clone(), seed.description.clone())
    }
}
