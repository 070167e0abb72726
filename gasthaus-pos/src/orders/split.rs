//! Split billing
//!
//! Guests pay part of a table: a selection of (line, quantity) pairs is
//! totalled, and on confirmation each selected line's quantity is reduced.
//! Lines paid down to zero disappear from the views but keep their record,
//! same as a confirmed removal.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::models::OrderLine;
use shared::money;
use shared::{AppError, AppResult};

/// One selected position of a partial payment
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSelection {
    pub key: String,
    pub pay_qty: i32,
}

/// Total of the current selection, rounded to cents
pub fn partial_total(lines: &BTreeMap<String, OrderLine>, selection: &[SplitSelection]) -> Decimal {
    let sum = selection
        .iter()
        .filter_map(|sel| {
            lines
                .get(&sel.key)
                .filter(|line| !line.is_deleted() && sel.pay_qty > 0)
                .map(|line| money::line_total(line.price, sel.pay_qty))
        })
        .sum();
    money::round_money(sum)
}

/// Validate a selection and plan the quantity reductions (key → remaining).
///
/// Validation happens before any mutation is issued: an empty selection, an
/// unknown line or a quantity outside `1..=qty` rejects the whole payment.
pub fn plan_partial_payment(
    lines: &BTreeMap<String, OrderLine>,
    selection: &[SplitSelection],
) -> AppResult<BTreeMap<String, i32>> {
    if selection.is_empty() {
        return Err(AppError::validation("no positions selected"));
    }

    let mut updates = BTreeMap::new();
    for sel in selection {
        let line = lines
            .get(&sel.key)
            .filter(|line| !line.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("order line {}", sel.key)))?;

        if sel.pay_qty <= 0 || sel.pay_qty > line.qty {
            return Err(AppError::validation(format!(
                "invalid pay quantity {} for {} (have {})",
                sel.pay_qty, sel.key, line.qty
            )));
        }

        updates.insert(sel.key.clone(), (line.qty - sel.pay_qty).max(0));
    }

    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Department;

    fn line(name: &str, qty: i32, price: f64) -> OrderLine {
        OrderLine {
            name: name.into(),
            price,
            qty,
            dept: Department::Bar,
            size: String::new(),
            course: None,
            note: String::new(),
            ordered_qty: Some(qty),
            printed_qty: Some(qty),
            last_added_at: 0,
        }
    }

    fn lines() -> BTreeMap<String, OrderLine> {
        [
            ("cola".to_string(), line("Cola", 3, 3.0)),
            ("bier".to_string(), line("Bier", 2, 3.5)),
        ]
        .into()
    }

    fn sel(key: &str, pay_qty: i32) -> SplitSelection {
        SplitSelection {
            key: key.into(),
            pay_qty,
        }
    }

    #[test]
    fn test_partial_total() {
        let total = partial_total(&lines(), &[sel("cola", 2), sel("bier", 1)]);
        assert_eq!(total, Decimal::new(950, 2)); // 2*3.00 + 1*3.50
    }

    #[test]
    fn test_plan_reduces_quantities() {
        let updates = plan_partial_payment(&lines(), &[sel("cola", 2), sel("bier", 2)]).unwrap();
        assert_eq!(updates["cola"], 1);
        assert_eq!(updates["bier"], 0);
    }

    #[test]
    fn test_empty_selection_rejected() {
        let err = plan_partial_payment(&lines(), &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_overpay_rejected_before_any_mutation() {
        let err = plan_partial_payment(&lines(), &[sel("cola", 4)]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unknown_line_rejected() {
        let err = plan_partial_payment(&lines(), &[sel("wein", 1)]).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
