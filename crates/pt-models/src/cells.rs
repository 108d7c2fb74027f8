//! Lenient readers for spreadsheet cells
//!
//! The remote sheet returns `""` for empty cells and may hand numbers back
//! as strings (or strings back as numbers). These helpers are used with
//! `#[serde(deserialize_with = ...)]` on the sheet-backed fields.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

fn whole_number<E: de::Error>(cell: Cell) -> Result<Option<u64>, E> {
    match cell {
        Cell::Unsigned(n) => Ok(Some(n)),
        Cell::Signed(n) => Err(E::custom(format!("expected a non-negative number, got {n}"))),
        Cell::Float(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(Some(f as u64)),
        Cell::Float(f) => Err(E::custom(format!("expected a whole number, got {f}"))),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if let Ok(n) = s.parse::<u64>() {
                return Ok(Some(n));
            }
            match s.parse::<f64>() {
                Ok(f) => whole_number(Cell::Float(f)),
                Err(_) => Err(E::custom(format!("expected a number, got {s:?}"))),
            }
        }
    }
}

/// A quantity; blank or null cells read as zero
pub fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let cell = Option::<Cell>::deserialize(deserializer)?;
    match cell {
        Some(cell) => Ok(whole_number::<D::Error>(cell)?.unwrap_or(0)),
        None => Ok(0),
    }
}

/// An optional count; blank or null cells read as `None`
pub fn optional_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let Some(cell) = Option::<Cell>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match whole_number::<D::Error>(cell)? {
        Some(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("count {n} is out of range"))),
        None => Ok(None),
    }
}

/// Optional text; blank cells read as `None` and numbers as their digits
pub fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let text = match Option::<Cell>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Cell::Text(s)) => s.trim().to_string(),
        Some(Cell::Unsigned(n)) => n.to_string(),
        Some(Cell::Signed(n)) => n.to_string(),
        Some(Cell::Float(f)) => f.to_string(),
    };
    Ok(Some(text).filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::quantity")]
        qty: u64,
        #[serde(default, deserialize_with = "super::optional_count")]
        crew: Option<u32>,
        #[serde(default, deserialize_with = "super::optional_text")]
        batch: Option<String>,
    }

    fn row(value: serde_json::Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_blank_cells() {
        let r = row(json!({"qty": "", "crew": "", "batch": ""}));
        assert_eq!((r.qty, r.crew, r.batch), (0, None, None));

        let r = row(json!({}));
        assert_eq!((r.qty, r.crew, r.batch), (0, None, None));

        let r = row(json!({"qty": null, "crew": null, "batch": null}));
        assert_eq!((r.qty, r.crew, r.batch), (0, None, None));
    }

    #[test]
    fn test_numbers_as_text_and_text_as_numbers() {
        let r = row(json!({"qty": "120", "crew": " 4 ", "batch": 20250105}));
        assert_eq!(r.qty, 120);
        assert_eq!(r.crew, Some(4));
        assert_eq!(r.batch.as_deref(), Some("20250105"));

        let r = row(json!({"qty": 75.0, "crew": "3.0"}));
        assert_eq!((r.qty, r.crew), (75, Some(3)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(serde_json::from_value::<Row>(json!({"qty": "lots"})).is_err());
        assert!(serde_json::from_value::<Row>(json!({"qty": -5})).is_err());
        assert!(serde_json::from_value::<Row>(json!({"crew": 2.5})).is_err());
    }
}
