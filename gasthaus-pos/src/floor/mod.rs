//! Floor plan management
//!
//! Tables live on a per-room grid. The plan cache is rebuilt from every
//! pushed room snapshot; edit operations (move, resize, rename, add,
//! delete) are planned here and persisted through the floor store.

pub mod seed;

use std::collections::BTreeMap;

use shared::models::TablePlan;
use shared::{AppError, AppResult};

pub use seed::seed_layout;

/// Tables never grow beyond 6x6 grid cells
pub const MAX_TABLE_EXTENT: i32 = 6;

/// Fixed grid dimensions of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomGrid {
    pub cols: i32,
    pub rows: i32,
}

/// Grid size per room; the main dining room is the largest
pub fn grid_for_room(room: &str) -> RoomGrid {
    match room.trim() {
        "Restaurant" => RoomGrid { cols: 20, rows: 13 },
        "Scheune EG" => RoomGrid { cols: 18, rows: 10 },
        "Scheune UG" => RoomGrid { cols: 18, rows: 8 },
        "Gewölbe" => RoomGrid { cols: 18, rows: 9 },
        "Terrasse" => RoomGrid { cols: 18, rows: 8 },
        _ => RoomGrid { cols: 12, rows: 8 },
    }
}

/// Keep a plan inside the grid: extents floored at 1, position clamped so
/// the rectangle fits
pub fn clamp_to_grid(plan: TablePlan, grid: RoomGrid) -> TablePlan {
    let w = plan.w.max(1);
    let h = plan.h.max(1);
    let max_x = (grid.cols - w).max(0);
    let max_y = (grid.rows - h).max(0);

    TablePlan {
        occupied: plan.occupied,
        x: plan.x.clamp(0, max_x),
        y: plan.y.clamp(0, max_y),
        w,
        h,
    }
}

/// One room's editable plan cache
#[derive(Debug, Clone)]
pub struct FloorPlan {
    grid: RoomGrid,
    tables: BTreeMap<String, TablePlan>,
}

impl FloorPlan {
    /// Rebuild from a pushed snapshot, clamping every plan into the grid
    pub fn from_snapshot(room: &str, tables: BTreeMap<String, TablePlan>) -> Self {
        let grid = grid_for_room(room);
        let tables = tables
            .into_iter()
            .map(|(id, plan)| (id, clamp_to_grid(plan, grid)))
            .collect();
        Self { grid, tables }
    }

    pub fn grid(&self) -> RoomGrid {
        self.grid
    }

    pub fn tables(&self) -> &BTreeMap<String, TablePlan> {
        &self.tables
    }

    pub fn get(&self, id: &str) -> Option<&TablePlan> {
        self.tables.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// First grid position (row-major) where a w x h rectangle overlaps no
    /// existing table; falls back to the origin when the room is full
    pub fn first_free_spot(&self, w: i32, h: i32) -> (i32, i32) {
        let max_x = (self.grid.cols - w).max(0);
        let max_y = (self.grid.rows - h).max(0);

        for y in 0..=max_y {
            for x in 0..=max_x {
                let candidate = TablePlan::at(x, y, w, h);
                if self.tables.values().all(|t| !t.overlaps(&candidate)) {
                    return (x, y);
                }
            }
        }
        (0, 0)
    }

    /// Smallest positive integer not used as a table id
    pub fn next_table_id(&self) -> String {
        let used: std::collections::BTreeSet<i32> = self
            .tables
            .keys()
            .filter_map(|id| id.parse().ok())
            .collect();
        let mut next = 1;
        while used.contains(&next) {
            next += 1;
        }
        next.to_string()
    }

    /// Plan a new 1x1 table on the first free spot
    pub fn plan_add_table(&self) -> (String, TablePlan) {
        let (x, y) = self.first_free_spot(1, 1);
        (self.next_table_id(), TablePlan::at(x, y, 1, 1))
    }

    /// Validate a rename. Duplicate, empty and unchanged ids are rejected
    /// before any write; execution is write-new-then-remove-old.
    pub fn plan_rename(&self, old_id: &str, new_id: &str) -> AppResult<(String, TablePlan)> {
        let new_id = new_id.trim();
        if new_id.is_empty() {
            return Err(AppError::validation("table id must not be empty"));
        }
        if new_id == old_id {
            return Err(AppError::validation("table id unchanged"));
        }
        if self.tables.contains_key(new_id) {
            return Err(AppError::conflict(format!("Tisch {}", new_id)));
        }
        let plan = *self
            .get(old_id)
            .ok_or_else(|| AppError::not_found(format!("Tisch {}", old_id)))?;

        Ok((new_id.to_string(), plan))
    }

    /// Grow/shrink a table by (dw, dh), extents kept in 1..=6, re-clamped
    pub fn plan_resize(&self, id: &str, dw: i32, dh: i32) -> AppResult<TablePlan> {
        let current = *self
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("Tisch {}", id)))?;

        let resized = TablePlan {
            w: (current.w + dw).clamp(1, MAX_TABLE_EXTENT),
            h: (current.h + dh).clamp(1, MAX_TABLE_EXTENT),
            ..current
        };
        Ok(clamp_to_grid(resized, self.grid))
    }

    /// Move a table to a grid position (drag drop target), clamped
    pub fn plan_move(&self, id: &str, x: i32, y: i32) -> AppResult<TablePlan> {
        let current = *self
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("Tisch {}", id)))?;
        Ok(clamp_to_grid(TablePlan { x, y, ..current }, self.grid))
    }

    /// Geometry of every table for a bulk save, all clamped
    pub fn plan_save(&self) -> BTreeMap<String, TablePlan> {
        self.tables
            .iter()
            .map(|(id, plan)| (id.clone(), clamp_to_grid(*plan, self.grid)))
            .collect()
    }
}
