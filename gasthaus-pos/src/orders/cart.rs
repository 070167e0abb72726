//! Live order cart
//!
//! Read model over the table's flat line collection, rebuilt from every
//! pushed snapshot. Mutations are *planned* here (the new line state is
//! computed and returned) and persisted by the caller through the store;
//! confirmed writes are echoed into the cache right away so consecutive
//! commands plan against the latest state, and every pushed snapshot then
//! replaces the cache wholesale. The store stays the single source of
//! truth.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::models::{Course, Department, MenuItem, MenuSize, OrderLine, line_key};
use shared::money;

use crate::menu::collate;
use crate::store::SERVER_TIMESTAMP;

/// Outcome of planning a decrement
#[derive(Debug, Clone, PartialEq)]
pub enum DecrementOutcome {
    /// Quantity reduced; persist the returned line state
    Reduced(OrderLine),
    /// Line sits at quantity 1 — removal needs explicit confirmation,
    /// then [`OrderCart::plan_zero`] applies it
    NeedsConfirmation,
    /// No such (visible) line
    NotFound,
}

/// In-memory mirror of `orders/<room>/<table>/current/items`.
///
/// Keeps *all* lines including those at qty 0: the sent-quantity
/// bookkeeping on dead lines still feeds the next delta. Views filter.
#[derive(Debug, Clone, Default)]
pub struct OrderCart {
    lines: BTreeMap<String, OrderLine>,
}

impl OrderCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache with a pushed snapshot
    pub fn apply_snapshot(&mut self, items: BTreeMap<String, OrderLine>) {
        self.lines = items;
    }

    /// Fold a confirmed local write back into the cache (the store's push
    /// will arrive later and replace everything; echoing keeps planning
    /// against the latest state in the meantime)
    pub fn apply_line(&mut self, key: &str, line: OrderLine) {
        self.lines.insert(key.to_string(), line);
    }

    /// Echo confirmed sent markers (see [`crate::orders::delta`])
    pub fn apply_sent_markers(&mut self, markers: &BTreeMap<String, i32>) {
        super::delta::apply_markers(&mut self.lines, markers);
    }

    /// Echo confirmed quantity reductions (split payments)
    pub fn apply_qty_updates(&mut self, updates: &BTreeMap<String, i32>) {
        for (key, qty) in updates {
            if let Some(line) = self.lines.get_mut(key) {
                line.qty = *qty;
            }
        }
    }

    /// Echo a confirmed close-out
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Raw lines including logically deleted ones (delta input)
    pub fn lines(&self) -> &BTreeMap<String, OrderLine> {
        &self.lines
    }

    pub fn get(&self, key: &str) -> Option<&OrderLine> {
        self.lines.get(key)
    }

    /// Lines the guest sees: positive quantity, ordered by when they were
    /// last touched (most recent last), name as tie-breaker
    pub fn visible_lines(&self) -> Vec<(&str, &OrderLine)> {
        let mut lines: Vec<(&str, &OrderLine)> = self
            .lines
            .iter()
            .filter(|(_, line)| !line.is_deleted())
            .map(|(k, line)| (k.as_str(), line))
            .collect();
        lines.sort_by(|(_, a), (_, b)| {
            a.last_added_at
                .cmp(&b.last_added_at)
                .then_with(|| collate(&a.name, &b.name))
        });
        lines
    }

    /// The cart is empty when no line has positive quantity
    pub fn is_empty(&self) -> bool {
        self.lines.values().all(|line| line.is_deleted())
    }

    /// Sum over visible lines, rounded to cents
    pub fn total(&self) -> Decimal {
        let sum = self
            .lines
            .values()
            .filter(|line| !line.is_deleted())
            .map(|line| money::line_total(line.price, line.qty))
            .sum();
        money::round_money(sum)
    }

    /// Plan adding a menu item (optionally a chosen size variant).
    ///
    /// Returns the storage key and the full new line state: either a fresh
    /// line at quantity 1 or the existing line incremented with a refreshed
    /// last-touched marker. A re-add on top of a qty-0 line revives it while
    /// keeping its sent-quantity bookkeeping.
    pub fn plan_add(
        &self,
        item: &MenuItem,
        size: Option<&MenuSize>,
        dept: Department,
        course: Option<Course>,
    ) -> (String, OrderLine) {
        let size_label = size.map(|s| s.label.as_str()).unwrap_or("");
        let price = size.map(|s| s.price).unwrap_or(item.price);
        let key = line_key(&item.id, size_label);

        let line = match self.lines.get(&key) {
            Some(existing) => {
                let mut line = existing.clone();
                line.qty += 1;
                line.last_added_at = SERVER_TIMESTAMP;
                // Course may have been re-derived since the line was created
                if dept == Department::Kitchen && course.is_some() {
                    line.course = course;
                }
                line
            }
            None => OrderLine {
                name: item.name.clone(),
                price,
                qty: 1,
                dept,
                size: size_label.to_string(),
                course: if dept == Department::Kitchen {
                    course
                } else {
                    None
                },
                note: String::new(),
                ordered_qty: Some(0),
                printed_qty: Some(0),
                last_added_at: SERVER_TIMESTAMP,
            },
        };

        (key, line)
    }

    /// Plan a decrement; quantity 1 demands confirmation first
    pub fn plan_decrement(&self, key: &str) -> DecrementOutcome {
        match self.lines.get(key) {
            Some(line) if line.qty > 1 => {
                let mut updated = line.clone();
                updated.qty -= 1;
                DecrementOutcome::Reduced(updated)
            }
            Some(line) if line.qty == 1 => DecrementOutcome::NeedsConfirmation,
            _ => DecrementOutcome::NotFound,
        }
    }

    /// Plan the confirmed removal: quantity drops to 0, the record stays so
    /// the sent-quantity bookkeeping survives for the cancellation ticket
    pub fn plan_zero(&self, key: &str) -> Option<OrderLine> {
        self.lines.get(key).map(|line| {
            let mut updated = line.clone();
            updated.qty = 0;
            updated
        })
    }

    /// Plan a note edit on a visible line
    pub fn plan_note(&self, key: &str, note: &str) -> Option<OrderLine> {
        self.lines
            .get(key)
            .filter(|line| !line.is_deleted())
            .map(|line| {
                let mut updated = line.clone();
                updated.note = note.trim().to_string();
                updated
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> MenuItem {
        MenuItem::simple("cola", "Cola", 3.0)
    }

    fn pils_sizes() -> MenuItem {
        MenuItem::with_sizes(
            "pils",
            "Krombacher Pils",
            vec![
                MenuSize {
                    label: "0,5l".into(),
                    price: 4.2,
                },
                MenuSize {
                    label: "0,3l".into(),
                    price: 2.8,
                },
            ],
        )
    }

    fn cart_with(entries: Vec<(&str, OrderLine)>) -> OrderCart {
        let mut cart = OrderCart::new();
        cart.apply_snapshot(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        );
        cart
    }

    fn line(name: &str, qty: i32, price: f64, last_added_at: i64) -> OrderLine {
        OrderLine {
            name: name.into(),
            price,
            qty,
            dept: Department::Bar,
            size: String::new(),
            course: None,
            note: String::new(),
            ordered_qty: Some(0),
            printed_qty: Some(0),
            last_added_at,
        }
    }

    #[test]
    fn test_plan_add_creates_line_at_one() {
        let cart = OrderCart::new();
        let (key, planned) = cart.plan_add(&cola(), None, Department::Bar, None);
        assert_eq!(key, "cola");
        assert_eq!(planned.qty, 1);
        assert_eq!(planned.ordered_qty, Some(0));
        assert_eq!(planned.last_added_at, SERVER_TIMESTAMP);
    }

    #[test]
    fn test_plan_add_with_size_uses_size_price_and_key() {
        let cart = OrderCart::new();
        let item = pils_sizes();
        let small = item.sizes[0].clone();
        let (key, planned) = cart.plan_add(&item, Some(&small), Department::Bar, None);
        assert_eq!(key, "pils__0,3l");
        assert_eq!(planned.price, 2.8);
        assert_eq!(planned.size, "0,3l");
    }

    #[test]
    fn test_plan_add_increments_existing() {
        let cart = cart_with(vec![("cola", line("Cola", 2, 3.0, 5))]);
        let (key, planned) = cart.plan_add(&cola(), None, Department::Bar, None);
        assert_eq!(key, "cola");
        assert_eq!(planned.qty, 3);
        assert_eq!(planned.last_added_at, SERVER_TIMESTAMP);
    }

    #[test]
    fn test_plan_add_revives_zeroed_line_keeping_bookkeeping() {
        let mut dead = line("Cola", 0, 3.0, 5);
        dead.ordered_qty = Some(2);
        dead.printed_qty = Some(2);
        let cart = cart_with(vec![("cola", dead)]);

        let (_, planned) = cart.plan_add(&cola(), None, Department::Bar, None);
        assert_eq!(planned.qty, 1);
        // sent bookkeeping intact: the next delta is 1 - 2 = -1 (storno)
        assert_eq!(planned.ordered_qty, Some(2));
    }

    #[test]
    fn test_decrement_above_one_reduces() {
        let cart = cart_with(vec![("cola", line("Cola", 3, 3.0, 0))]);
        match cart.plan_decrement("cola") {
            DecrementOutcome::Reduced(updated) => assert_eq!(updated.qty, 2),
            other => panic!("expected Reduced, got {:?}", other),
        }
    }

    #[test]
    fn test_decrement_at_one_needs_confirmation_then_zeroes() {
        let cart = cart_with(vec![("cola", line("Cola", 1, 3.0, 0))]);
        assert_eq!(
            cart.plan_decrement("cola"),
            DecrementOutcome::NeedsConfirmation
        );

        let zeroed = cart.plan_zero("cola").unwrap();
        assert_eq!(zeroed.qty, 0);
        assert!(zeroed.is_deleted());
    }

    #[test]
    fn test_zeroed_line_absent_from_views_and_total() {
        let cart = cart_with(vec![
            ("cola", line("Cola", 0, 3.0, 0)),
            ("bier", line("Bier", 2, 3.5, 1)),
        ]);
        assert_eq!(cart.visible_lines().len(), 1);
        assert_eq!(cart.total(), Decimal::new(700, 2));
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_visible_lines_sorted_by_last_touched_then_name() {
        let cart = cart_with(vec![
            ("z", line("Älteste", 1, 1.0, 1)),
            ("a", line("Zuletzt", 1, 1.0, 9)),
            ("m", line("apfel", 1, 1.0, 1)),
        ]);
        let names: Vec<&str> = cart
            .visible_lines()
            .iter()
            .map(|(_, l)| l.name.as_str())
            .collect();
        // same timestamp: collation keys "alteste" < "apfel" decide
        assert_eq!(names, vec!["Älteste", "apfel", "Zuletzt"]);
    }

    #[test]
    fn test_note_edit_only_on_visible_lines() {
        let cart = cart_with(vec![
            ("cola", line("Cola", 1, 3.0, 0)),
            ("dead", line("Weg", 0, 3.0, 0)),
        ]);
        let updated = cart.plan_note("cola", "  ohne Eis ").unwrap();
        assert_eq!(updated.note, "ohne Eis");
        assert!(cart.plan_note("dead", "x").is_none());
    }

    #[test]
    fn test_empty_cart() {
        let cart = cart_with(vec![("cola", line("Cola", 0, 3.0, 0))]);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
