//! Backing store abstraction
//!
//! The store of record is an external realtime document tree shared by all
//! tablets. This module models it the only way the core needs it:
//!
//! - **observe**: long-lived, push-driven streams of *full* snapshots via
//!   `tokio::sync::watch`. A new snapshot always fully supersedes the
//!   previous derived state; there is no incremental merge and no conflict
//!   resolution (last write wins at the store).
//! - **write**: small targeted operations mirroring the persisted paths.
//!
//! Timestamps are server-side: writers place [`SERVER_TIMESTAMP`] in
//! `last_added_at`/`paid_at` fields and the store substitutes its own
//! monotonic clock.

pub mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use shared::AppResult;
use shared::models::{HistoryRecord, OrderLine, TablePlan};
use tokio::sync::watch;

pub use memory::MemoryStore;

/// Sentinel replaced by the store's clock at write time
pub const SERVER_TIMESTAMP: i64 = -1;

/// Address of one table's order document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TablePath {
    pub room: String,
    pub table: String,
}

impl TablePath {
    pub fn new(room: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            table: table.into(),
        }
    }
}

impl std::fmt::Display for TablePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.room, self.table)
    }
}

/// Full snapshot of the raw menu document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuSnapshot {
    pub root: Value,
}

/// Full snapshot of one table's live order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSnapshot {
    pub items: BTreeMap<String, OrderLine>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Full snapshot of one room's floor plan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomSnapshot {
    pub tables: BTreeMap<String, TablePlan>,
}

/// Menu side: read-only, observe-only
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Restartable stream of full menu snapshots
    async fn observe_menu(&self) -> AppResult<watch::Receiver<MenuSnapshot>>;
}

/// Live order documents per table
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Restartable stream of full order snapshots for one table
    async fn observe_items(&self, table: &TablePath) -> AppResult<watch::Receiver<OrderSnapshot>>;

    /// Upsert a whole line (also bumps the order's `updated_at`; sets
    /// `created_at` when the order did not exist yet)
    async fn put_line(&self, table: &TablePath, key: &str, line: OrderLine) -> AppResult<()>;

    /// Batch quantity reductions (split payments)
    async fn apply_qty_updates(
        &self,
        table: &TablePath,
        updates: &BTreeMap<String, i32>,
    ) -> AppResult<()>;

    /// Advance `ordered_qty`/`printed_qty` after a confirmed send
    async fn apply_sent_markers(
        &self,
        table: &TablePath,
        markers: &BTreeMap<String, i32>,
    ) -> AppResult<()>;

    /// Append a close-out record under a fresh id
    async fn archive_history(
        &self,
        table: &TablePath,
        history_id: &str,
        record: &HistoryRecord,
    ) -> AppResult<()>;

    /// Drop the live order document (second step of close-out)
    async fn clear_current(&self, table: &TablePath) -> AppResult<()>;
}

/// Floor plans per room
#[async_trait]
pub trait FloorStore: Send + Sync {
    /// Restartable stream of full room snapshots
    async fn observe_tables(&self, room: &str) -> AppResult<watch::Receiver<RoomSnapshot>>;

    async fn put_table(&self, room: &str, table_id: &str, plan: TablePlan) -> AppResult<()>;

    async fn remove_table(&self, room: &str, table_id: &str) -> AppResult<()>;

    /// Batch geometry update (saving an edited plan)
    async fn apply_plan(&self, room: &str, plans: &BTreeMap<String, TablePlan>) -> AppResult<()>;

    async fn set_occupied(&self, room: &str, table_id: &str, occupied: bool) -> AppResult<()>;
}
