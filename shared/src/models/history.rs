//! Order History Model
//!
//! Append-only close-out records under `orders/<room>/<table>/history/<id>`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money;

/// Verbatim copy of a live line taken at close-out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedLine {
    pub name: String,
    pub price: f64,
    pub qty: i32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub last_added_at: i64,
}

/// One paid order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub paid_at: i64,
    pub items: BTreeMap<String, ArchivedLine>,
}

impl HistoryRecord {
    /// Sum over all archived lines, rounded to cents
    pub fn total(&self) -> rust_decimal::Decimal {
        let sum = self
            .items
            .values()
            .map(|line| money::line_total(line.price, line.qty))
            .sum();
        money::round_money(sum)
    }
}
