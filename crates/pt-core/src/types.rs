//! Common types used throughout prodtrack

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc, Weekday};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static ISO_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("valid month pattern"));

/// Record identifier
///
/// The remote sheet hands back ids as JSON numbers while locally created
/// records carry strings, so ids accept either on input and always compare
/// by their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Fresh identifier for a newly created record
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a raw id string using string normalization
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecordId::new(s),
            RawId::Signed(n) => RecordId(n.to_string()),
            RawId::Unsigned(n) => RecordId(n.to_string()),
            RawId::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                RecordId((f as i64).to_string())
            }
            RawId::Float(f) => RecordId(f.to_string()),
        })
    }
}

/// Month key in `YYYY-MM` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if !MONTH_PATTERN.is_match(value) {
            return None;
        }
        NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()?;
        Some(Self(value.to_string()))
    }

    /// Month containing the given calendar date
    pub fn of_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a `YYYY-MM-DD` date string falls in this month
    pub fn contains(&self, date: &str) -> bool {
        date.get(..7) == Some(self.0.as_str())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid month key: {raw}")))
    }
}

/// Validates `YYYY-MM-DD` shape and that the date exists on the calendar
pub fn is_valid_iso_date(value: &str) -> bool {
    ISO_DATE_PATTERN.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Strip any time portion from a date string (`2025-01-05T00:00:00Z` -> `2025-01-05`)
pub fn normalize_date(value: &str) -> String {
    value.trim().split('T').next().unwrap_or_default().to_string()
}

/// Calendar clock pinned to the site's UTC offset
///
/// Dates are always computed in site time so an entry logged shortly after
/// local midnight does not land on the previous day.
#[derive(Debug, Clone, Copy)]
pub struct SiteClock {
    offset: FixedOffset,
}

impl SiteClock {
    /// Kuala Lumpur, UTC+08:00
    pub const DEFAULT_OFFSET_HOURS: i32 = 8;

    pub fn new(offset_hours: i32) -> Self {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// `YYYY-MM-DD` for the current site date
    pub fn today_iso(&self) -> String {
        self.today_at(Utc::now()).format("%Y-%m-%d").to_string()
    }

    /// `YYYY-MM` for the current site month
    pub fn current_month(&self) -> MonthKey {
        MonthKey::of_date(self.today_at(Utc::now()))
    }
}

impl Default for SiteClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OFFSET_HOURS)
    }
}

/// Render a date for display, e.g. `2025-12-25 THURSDAY`
pub fn display_date(value: &str) -> String {
    if value.trim().is_empty() {
        return "Invalid Date".to_string();
    }
    let clean = normalize_date(value);
    match NaiveDate::parse_from_str(&clean, "%Y-%m-%d") {
        Ok(date) => format!("{} {}", clean, weekday_name(date.weekday())),
        Err(_) => clean,
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}
