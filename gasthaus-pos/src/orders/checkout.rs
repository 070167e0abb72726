//! Order close-out
//!
//! Paying a table is a strictly sequenced three-step operation:
//! archive a verbatim copy of the live lines, clear the live document,
//! clear the table's occupied flag. The order counts as paid only when all
//! steps succeed; a failure after archiving leaves a recoverable,
//! re-closeable state rather than losing data (a duplicated history record
//! is preferred over a vanished order).

use std::collections::BTreeMap;

use shared::models::{ArchivedLine, HistoryRecord, OrderLine};
use shared::{AppError, AppResult};
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::{FloorStore, OrderStore, SERVER_TIMESTAMP, TablePath};

/// Copy every positive-quantity line verbatim into a history record.
/// Closing an empty order is a validation error, caught before any write.
pub fn build_history_record(lines: &BTreeMap<String, OrderLine>) -> AppResult<HistoryRecord> {
    let items: BTreeMap<String, ArchivedLine> = lines
        .iter()
        .filter(|(_, line)| !line.is_deleted())
        .map(|(key, line)| {
            (
                key.clone(),
                ArchivedLine {
                    name: line.name.clone(),
                    price: line.price,
                    qty: line.qty,
                    size: line.size.clone(),
                    note: line.note.clone(),
                    last_added_at: line.last_added_at,
                },
            )
        })
        .collect();

    if items.is_empty() {
        return Err(AppError::validation("no open order to close"));
    }

    Ok(HistoryRecord {
        paid_at: SERVER_TIMESTAMP,
        items,
    })
}

/// Close the order: archive, then clear, then free the table.
///
/// Returns the fresh history id. Errors propagate at the exact step they
/// occur so the caller can tell "nothing happened" (archive failed) from
/// "re-closeable" (archive done, clear failed).
pub async fn close_order<S>(
    store: &S,
    table: &TablePath,
    lines: &BTreeMap<String, OrderLine>,
) -> AppResult<String>
where
    S: OrderStore + FloorStore,
{
    let record = build_history_record(lines)?;
    let history_id = Uuid::new_v4().to_string();

    store.archive_history(table, &history_id, &record).await?;

    if let Err(e) = store.clear_current(table).await {
        warn!(
            table = %table,
            history_id = %history_id,
            error = %e,
            "archived but failed to clear live order; close must be retried"
        );
        return Err(e);
    }

    store
        .set_occupied(&table.room, &table.table, false)
        .await?;

    info!(table = %table, history_id = %history_id, "order closed");
    Ok(history_id)
}
