//! In-memory store
//!
//! Implements the store traits over process-local maps with `watch`
//! fan-out. Serves two roles: the cache tier rebuilt from the remote
//! store's pushes, and the backend for tests and demos. Semantics mirror
//! the remote store: every write publishes a fresh full snapshot, and
//! [`SERVER_TIMESTAMP`] sentinels are replaced by a monotonic clock.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use shared::AppResult;
use shared::models::{HistoryRecord, OrderLine, TablePlan};
use tokio::sync::watch;
use tracing::debug;

use super::{
    FloorStore, MenuSnapshot, MenuStore, OrderSnapshot, OrderStore, RoomSnapshot, SERVER_TIMESTAMP,
    TablePath,
};

struct OrderDoc {
    items: BTreeMap<String, OrderLine>,
    created_at: Option<i64>,
    updated_at: Option<i64>,
    history: BTreeMap<String, HistoryRecord>,
    tx: watch::Sender<OrderSnapshot>,
}

impl OrderDoc {
    fn new() -> Self {
        let (tx, _) = watch::channel(OrderSnapshot::default());
        Self {
            items: BTreeMap::new(),
            created_at: None,
            updated_at: None,
            history: BTreeMap::new(),
            tx,
        }
    }

    fn publish(&self) {
        self.tx.send_replace(OrderSnapshot {
            items: self.items.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        });
    }
}

struct RoomDoc {
    tables: BTreeMap<String, TablePlan>,
    tx: watch::Sender<RoomSnapshot>,
}

impl RoomDoc {
    fn new() -> Self {
        let (tx, _) = watch::channel(RoomSnapshot::default());
        Self {
            tables: BTreeMap::new(),
            tx,
        }
    }

    fn publish(&self) {
        self.tx.send_replace(RoomSnapshot {
            tables: self.tables.clone(),
        });
    }
}

/// Process-local document store with watch fan-out
pub struct MemoryStore {
    menu_tx: watch::Sender<MenuSnapshot>,
    orders: DashMap<String, OrderDoc>,
    rooms: DashMap<String, RoomDoc>,
    clock: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (menu_tx, _) = watch::channel(MenuSnapshot::default());
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            menu_tx,
            orders: DashMap::new(),
            rooms: DashMap::new(),
            clock: AtomicI64::new(now),
        }
    }

    /// Strictly monotonic millisecond clock (the "server" time)
    fn tick(&self) -> i64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn stamp(&self, value: i64) -> i64 {
        if value == SERVER_TIMESTAMP {
            self.tick()
        } else {
            value
        }
    }

    /// Replace the whole menu document and notify observers
    pub fn set_menu(&self, root: Value) {
        self.menu_tx.send_replace(MenuSnapshot { root });
    }

    /// Archived records of one table (test/reporting access)
    pub fn history(&self, table: &TablePath) -> BTreeMap<String, HistoryRecord> {
        self.orders
            .get(&table.to_string())
            .map(|doc| doc.history.clone())
            .unwrap_or_default()
    }

    /// Current floor plan of one room (test/reporting access)
    pub fn tables(&self, room: &str) -> BTreeMap<String, TablePlan> {
        self.rooms
            .get(room)
            .map(|doc| doc.tables.clone())
            .unwrap_or_default()
    }

    fn with_order<R>(&self, table: &TablePath, f: impl FnOnce(&mut OrderDoc) -> R) -> R {
        let mut doc = self
            .orders
            .entry(table.to_string())
            .or_insert_with(OrderDoc::new);
        f(doc.value_mut())
    }

    fn with_room<R>(&self, room: &str, f: impl FnOnce(&mut RoomDoc) -> R) -> R {
        let mut doc = self.rooms.entry(room.to_string()).or_insert_with(RoomDoc::new);
        f(doc.value_mut())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn observe_menu(&self) -> AppResult<watch::Receiver<MenuSnapshot>> {
        Ok(self.menu_tx.subscribe())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn observe_items(&self, table: &TablePath) -> AppResult<watch::Receiver<OrderSnapshot>> {
        Ok(self.with_order(table, |doc| doc.tx.subscribe()))
    }

    async fn put_line(&self, table: &TablePath, key: &str, mut line: OrderLine) -> AppResult<()> {
        let now = self.tick();
        line.last_added_at = self.stamp(line.last_added_at);

        self.with_order(table, |doc| {
            debug!(table = %table, key, qty = line.qty, "put_line");
            if doc.created_at.is_none() {
                doc.created_at = Some(now);
            }
            doc.updated_at = Some(now);
            doc.items.insert(key.to_string(), line);
            doc.publish();
        });
        Ok(())
    }

    async fn apply_qty_updates(
        &self,
        table: &TablePath,
        updates: &BTreeMap<String, i32>,
    ) -> AppResult<()> {
        let now = self.tick();
        self.with_order(table, |doc| {
            for (key, qty) in updates {
                if let Some(line) = doc.items.get_mut(key) {
                    line.qty = *qty;
                }
            }
            doc.updated_at = Some(now);
            doc.publish();
        });
        Ok(())
    }

    async fn apply_sent_markers(
        &self,
        table: &TablePath,
        markers: &BTreeMap<String, i32>,
    ) -> AppResult<()> {
        self.with_order(table, |doc| {
            for (key, qty) in markers {
                if let Some(line) = doc.items.get_mut(key) {
                    line.ordered_qty = Some(*qty);
                    line.printed_qty = Some(*qty);
                }
            }
            doc.publish();
        });
        Ok(())
    }

    async fn archive_history(
        &self,
        table: &TablePath,
        history_id: &str,
        record: &HistoryRecord,
    ) -> AppResult<()> {
        let mut record = record.clone();
        record.paid_at = self.stamp(record.paid_at);

        self.with_order(table, |doc| {
            debug!(table = %table, history_id, items = record.items.len(), "archive_history");
            doc.history.insert(history_id.to_string(), record);
        });
        Ok(())
    }

    async fn clear_current(&self, table: &TablePath) -> AppResult<()> {
        self.with_order(table, |doc| {
            doc.items.clear();
            doc.created_at = None;
            doc.updated_at = None;
            doc.publish();
        });
        Ok(())
    }
}

#[async_trait]
impl FloorStore for MemoryStore {
    async fn observe_tables(&self, room: &str) -> AppResult<watch::Receiver<RoomSnapshot>> {
        Ok(self.with_room(room, |doc| doc.tx.subscribe()))
    }

    async fn put_table(&self, room: &str, table_id: &str, plan: TablePlan) -> AppResult<()> {
        self.with_room(room, |doc| {
            doc.tables.insert(table_id.to_string(), plan);
            doc.publish();
        });
        Ok(())
    }

    async fn remove_table(&self, room: &str, table_id: &str) -> AppResult<()> {
        self.with_room(room, |doc| {
            doc.tables.remove(table_id);
            doc.publish();
        });
        Ok(())
    }

    async fn apply_plan(&self, room: &str, plans: &BTreeMap<String, TablePlan>) -> AppResult<()> {
        self.with_room(room, |doc| {
            for (id, plan) in plans {
                let occupied = doc.tables.get(id).map(|t| t.occupied).unwrap_or(false);
                let mut plan = *plan;
                plan.occupied = occupied;
                doc.tables.insert(id.clone(), plan);
            }
            doc.publish();
        });
        Ok(())
    }

    async fn set_occupied(&self, room: &str, table_id: &str, occupied: bool) -> AppResult<()> {
        self.with_room(room, |doc| {
            if let Some(plan) = doc.tables.get_mut(table_id) {
                plan.occupied = occupied;
            } else {
                doc.tables.insert(
                    table_id.to_string(),
                    TablePlan {
                        occupied,
                        ..TablePlan::default()
                    },
                );
            }
            doc.publish();
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Department;

    fn line(name: &str, qty: i32) -> OrderLine {
        OrderLine {
            name: name.into(),
            price: 3.0,
            qty,
            dept: Department::Bar,
            size: String::new(),
            course: None,
            note: String::new(),
            ordered_qty: Some(0),
            printed_qty: Some(0),
            last_added_at: SERVER_TIMESTAMP,
        }
    }

    #[tokio::test]
    async fn test_put_line_publishes_snapshot_and_stamps_timestamp() {
        let store = MemoryStore::new();
        let table = TablePath::new("Saal", "7");
        let mut rx = store.observe_items(&table).await.unwrap();

        store.put_line(&table, "cola", line("Cola", 1)).await.unwrap();

        rx.changed().await.unwrap();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.items["cola"].last_added_at > 0);
        assert!(snapshot.created_at.is_some());
    }

    #[tokio::test]
    async fn test_timestamps_are_monotonic() {
        let store = MemoryStore::new();
        let table = TablePath::new("Saal", "7");

        store.put_line(&table, "a", line("A", 1)).await.unwrap();
        store.put_line(&table, "b", line("B", 1)).await.unwrap();

        let rx = store.observe_items(&table).await.unwrap();
        let snapshot = rx.borrow().clone();
        assert!(snapshot.items["b"].last_added_at > snapshot.items["a"].last_added_at);
    }

    #[tokio::test]
    async fn test_observer_sees_full_replacement() {
        let store = MemoryStore::new();
        let table = TablePath::new("Saal", "7");
        store.put_line(&table, "cola", line("Cola", 2)).await.unwrap();

        let rx = store.observe_items(&table).await.unwrap();
        store.clear_current(&table).await.unwrap();

        let snapshot = rx.borrow().clone();
        assert!(snapshot.items.is_empty());
        assert!(snapshot.created_at.is_none());
    }

    #[tokio::test]
    async fn test_sent_markers_update_both_fields() {
        let store = MemoryStore::new();
        let table = TablePath::new("Saal", "7");
        store.put_line(&table, "cola", line("Cola", 3)).await.unwrap();

        let markers: BTreeMap<String, i32> = [("cola".to_string(), 3)].into();
        store.apply_sent_markers(&table, &markers).await.unwrap();

        let rx = store.observe_items(&table).await.unwrap();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.items["cola"].ordered_qty, Some(3));
        assert_eq!(snapshot.items["cola"].printed_qty, Some(3));
    }

    #[tokio::test]
    async fn test_apply_plan_preserves_occupied_flag() {
        let store = MemoryStore::new();
        store
            .put_table("Saal", "7", TablePlan::at(1, 1, 2, 2))
            .await
            .unwrap();
        store.set_occupied("Saal", "7", true).await.unwrap();

        let plans: BTreeMap<String, TablePlan> =
            [("7".to_string(), TablePlan::at(3, 3, 2, 2))].into();
        store.apply_plan("Saal", &plans).await.unwrap();

        let tables = store.tables("Saal");
        assert!(tables["7"].occupied);
        assert_eq!(tables["7"].x, 3);
    }
}
