//! Core traits shared by models, the store, and services

use crate::types::RecordId;

/// Trait for records addressed by a string-normalized id
pub trait Identifiable {
    fn record_id(&self) -> &RecordId;

    /// Whether this record's id matches a raw id string
    fn has_id(&self, raw: &str) -> bool {
        self.record_id().matches(raw)
    }
}

/// Trait for records keyed by a calendar date string
pub trait Dated {
    /// `YYYY-MM-DD`
    fn date(&self) -> &str;
}

/// Sort records descending by date string.
///
/// Lexicographic order is date order because the format is fixed-width ISO.
pub fn sort_by_date_desc<T: Dated>(records: &mut [T]) {
    records.sort_by(|a, b| b.date().cmp(a.date()));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Day(&'static str);

    impl Dated for Day {
        fn date(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut days = vec![Day("2025-01-05"), Day("2025-01-31"), Day("2024-12-31")];
        sort_by_date_desc(&mut days);
        let order: Vec<_> = days.iter().map(|d| d.0).collect();
        assert_eq!(order, vec!["2025-01-31", "2025-01-05", "2024-12-31"]);
    }
}
