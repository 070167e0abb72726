//! Initial floor layouts
//!
//! Applied only when a room has no tables yet; the live plan is edited on
//! the device afterwards.

use std::collections::BTreeMap;

use shared::models::TablePlan;

fn add(tables: &mut BTreeMap<String, TablePlan>, id: &str, x: i32, y: i32, w: i32, h: i32) {
    tables.insert(id.to_string(), TablePlan::at(x, y, w, h));
}

/// The fixed starting layout of a room. Unknown rooms get a 10-table
/// default block.
pub fn seed_layout(room: &str) -> BTreeMap<String, TablePlan> {
    let mut t = BTreeMap::new();

    match room.trim() {
        "Restaurant" => {
            add(&mut t, "1", 18, 2, 2, 2);
            add(&mut t, "2", 18, 0, 2, 1);
            add(&mut t, "3", 18, 5, 2, 2);
            add(&mut t, "4", 18, 8, 2, 2);
            add(&mut t, "5", 18, 10, 2, 2);
            add(&mut t, "6", 13, 0, 2, 1);
            add(&mut t, "7", 19, 0, 1, 1);
            add(&mut t, "8", 19, 2, 1, 2);
            add(&mut t, "9", 14, 1, 2, 2);
            add(&mut t, "10", 19, 7, 1, 2);
            add(&mut t, "11", 9, 7, 2, 3);
            add(&mut t, "14", 3, 0, 2, 1);
        }
        "Gewölbe" => {
            add(&mut t, "17", 3, 0, 2, 2);
            add(&mut t, "18", 7, 0, 2, 2);
            add(&mut t, "14", 0, 4, 2, 3);
            add(&mut t, "15", 4, 4, 2, 3);
            add(&mut t, "16", 8, 4, 2, 3);
        }
        "Scheune EG" => {
            add(&mut t, "30", 0, 0, 1, 1);
            add(&mut t, "31", 1, 0, 2, 1);
            add(&mut t, "32", 3, 0, 2, 1);
            add(&mut t, "33", 5, 0, 2, 1);
            add(&mut t, "34", 7, 0, 2, 1);
            add(&mut t, "37", 0, 2, 1, 2);
            add(&mut t, "38", 0, 4, 1, 2);
            add(&mut t, "35", 3, 4, 3, 1);
            add(&mut t, "36", 8, 3, 3, 1);
        }
        "Scheune UG" => {
            add(&mut t, "40", 0, 3, 1, 1);
            add(&mut t, "41", 3, 4, 2, 2);
            add(&mut t, "42", 6, 6, 2, 2);
            add(&mut t, "43", 7, 4, 2, 2);
            add(&mut t, "44", 9, 2, 2, 2);
        }
        "Terrasse" => {
            add(&mut t, "60", 0, 0, 2, 2);
            add(&mut t, "61", 2, 0, 2, 2);
            add(&mut t, "62", 4, 0, 2, 2);
            add(&mut t, "65", 6, 1, 1, 1);
            add(&mut t, "63", 1, 4, 2, 2);
            add(&mut t, "64", 3, 4, 2, 2);
            add(&mut t, "66", 7, 4, 2, 2);
            add(&mut t, "67", 8, 7, 3, 1);
        }
        _ => {
            for i in 1..=10 {
                add(&mut t, &format!("T{}", i), (i - 1) % 4, (i - 1) / 4, 1, 1);
            }
        }
    }

    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::{clamp_to_grid, grid_for_room};

    #[test]
    fn test_known_rooms_have_layouts() {
        assert_eq!(seed_layout("Restaurant").len(), 12);
        assert_eq!(seed_layout("Gewölbe").len(), 5);
        assert_eq!(seed_layout("Terrasse").len(), 8);
    }

    #[test]
    fn test_unknown_room_gets_default_block() {
        let t = seed_layout("Wintergarten");
        assert_eq!(t.len(), 10);
        assert!(t.contains_key("T1"));
        assert!(t.contains_key("T10"));
    }

    #[test]
    fn test_seeds_fit_their_grids() {
        for room in ["Restaurant", "Gewölbe", "Scheune EG", "Scheune UG", "Terrasse"] {
            let grid = grid_for_room(room);
            for (id, plan) in seed_layout(room) {
                assert_eq!(
                    clamp_to_grid(plan, grid),
                    plan,
                    "table {} in {} sticks out of the grid",
                    id,
                    room
                );
            }
        }
    }

    #[test]
    fn test_seeded_tables_start_free() {
        assert!(seed_layout("Restaurant").values().all(|t| !t.occupied));
    }
}
