//! Order Line Model
//!
//! One flat line of a live table order as stored under
//! `orders/<room>/<table>/current/items/<lineKey>`.

use serde::{Deserialize, Deserializer, Serialize};

/// Destination department for a line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    #[default]
    Bar,
    Kitchen,
}

/// Course classification, meaningful for kitchen lines only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Course {
    Starter,
    Main,
    Dessert,
}

/// Bar lines carry an empty string in the `course` field; map it to `None`.
fn course_or_empty<'de, D>(deserializer: D) -> Result<Option<Course>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("STARTER") => Some(Course::Starter),
        Some("MAIN") => Some(Course::Main),
        Some("DESSERT") => Some(Course::Dessert),
        _ => None,
    })
}

fn course_to_wire<S>(course: &Option<Course>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let s = match course {
        Some(Course::Starter) => "STARTER",
        Some(Course::Main) => "MAIN",
        Some(Course::Dessert) => "DESSERT",
        None => "",
    };
    serializer.serialize_str(s)
}

/// Live order line
///
/// `qty <= 0` means the line is logically deleted: it is excluded from
/// totals, views and deltas, but the record may persist at qty 0 so the
/// sent-quantity bookkeeping survives a later re-add.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    pub price: f64,
    pub qty: i32,
    #[serde(default)]
    pub dept: Department,
    #[serde(default)]
    pub size: String,
    #[serde(
        default,
        deserialize_with = "course_or_empty",
        serialize_with = "course_to_wire"
    )]
    pub course: Option<Course>,
    #[serde(default)]
    pub note: String,
    /// Quantity as of the last successful send to bar/kitchen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_qty: Option<i32>,
    /// Legacy twin of `ordered_qty`; written alongside it, read as fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printed_qty: Option<i32>,
    /// Monotonic marker used purely for display ordering
    #[serde(default)]
    pub last_added_at: i64,
}

impl OrderLine {
    /// The quantity already sent to its department. Reads `ordered_qty`,
    /// falling back to the legacy `printed_qty` when only that is present.
    pub fn sent_qty(&self) -> i32 {
        self.ordered_qty.or(self.printed_qty).unwrap_or(0)
    }

    /// A line at qty 0 (or below) is treated as absent everywhere
    pub fn is_deleted(&self) -> bool {
        self.qty <= 0
    }
}

/// Storage key of a line: `itemId` or `itemId__sizeLabel` when a size was
/// chosen, so each size variant is its own line.
pub fn line_key(item_id: &str, size_label: &str) -> String {
    if size_label.is_empty() {
        item_id.to_string()
    } else {
        format!("{}__{}", item_id, size_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_key() {
        assert_eq!(line_key("cola", ""), "cola");
        assert_eq!(line_key("pils", "0,3l"), "pils__0,3l");
    }

    #[test]
    fn test_sent_qty_fallback() {
        let mut line = OrderLine {
            name: "Pils".into(),
            price: 4.2,
            qty: 3,
            dept: Department::Bar,
            size: String::new(),
            course: None,
            note: String::new(),
            ordered_qty: None,
            printed_qty: Some(2),
            last_added_at: 0,
        };
        assert_eq!(line.sent_qty(), 2);

        line.ordered_qty = Some(1);
        assert_eq!(line.sent_qty(), 1);

        line.ordered_qty = None;
        line.printed_qty = None;
        assert_eq!(line.sent_qty(), 0);
    }

    #[test]
    fn test_course_wire_roundtrip() {
        let json = r#"{"name":"Steak","price":24.5,"qty":1,"dept":"KITCHEN","course":"MAIN"}"#;
        let line: OrderLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.course, Some(Course::Main));

        let bar = r#"{"name":"Cola","price":3.0,"qty":2,"dept":"BAR","course":""}"#;
        let line: OrderLine = serde_json::from_str(bar).unwrap();
        assert_eq!(line.course, None);

        let out = serde_json::to_value(&line).unwrap();
        assert_eq!(out["course"], "");
        assert_eq!(out["dept"], "BAR");
    }

    #[test]
    fn test_zero_qty_is_deleted() {
        let json = r#"{"name":"Cola","price":3.0,"qty":0}"#;
        let line: OrderLine = serde_json::from_str(json).unwrap();
        assert!(line.is_deleted());
    }
}
