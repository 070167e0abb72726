//! Table Plan Model

use serde::{Deserialize, Serialize};

/// One table on a room's floor plan, in grid units, as stored under
/// `rooms/<room>/tables/<tableId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePlan {
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "default_extent")]
    pub w: i32,
    #[serde(default = "default_extent")]
    pub h: i32,
}

fn default_extent() -> i32 {
    1
}

impl Default for TablePlan {
    fn default() -> Self {
        Self {
            occupied: false,
            x: 0,
            y: 0,
            w: 1,
            h: 1,
        }
    }
}

impl TablePlan {
    pub fn at(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            occupied: false,
            x,
            y,
            w,
            h,
        }
    }

    /// Axis-aligned rectangle overlap in grid units
    pub fn overlaps(&self, other: &TablePlan) -> bool {
        !(self.x + self.w - 1 < other.x
            || self.x > other.x + other.w - 1
            || self.y + self.h - 1 < other.y
            || self.y > other.y + other.h - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = TablePlan::at(0, 0, 2, 2);
        let b = TablePlan::at(1, 1, 2, 2);
        let c = TablePlan::at(2, 0, 1, 1);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_defaults_from_sparse_json() {
        let plan: TablePlan = serde_json::from_str(r#"{"occupied":true}"#).unwrap();
        assert!(plan.occupied);
        assert_eq!((plan.w, plan.h), (1, 1));
    }
}
