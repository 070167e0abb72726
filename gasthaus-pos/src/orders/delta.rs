//! Send-delta computation and course routing
//!
//! On "send to kitchen/bar" every line's current quantity is compared with
//! the quantity of the last successful send. Positive differences become
//! "new" ticket lines, negative ones cancellation (storno) lines. Buckets:
//! bar in one ticket, kitchen split per course, so a starter ticket can be
//! fired independently of the mains.
//!
//! The sent markers are advanced only after the transport confirmed
//! delivery; a failed print leaves them untouched so the next attempt
//! recomputes the same delta (at-least-once — a duplicated ticket beats a
//! silently lost one).

use std::collections::BTreeMap;

use shared::models::{Course, Department, OrderLine};

use crate::printing::types::{STORNO_PREFIX, TicketDelta, TicketLine};

/// Everything one "send" press needs: the tickets to print and the marker
/// advancement to persist once all of them made it out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendPlan {
    pub tickets: Vec<TicketDelta>,
    /// line key → quantity the sent markers advance to
    pub markers: BTreeMap<String, i32>,
}

impl SendPlan {
    /// No changes since the last send: nothing to print, nothing to mark
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// Bucket identity during computation, in fixed print order
const BUCKETS: [(Department, Option<Course>); 4] = [
    (Department::Bar, None),
    (Department::Kitchen, Some(Course::Starter)),
    (Department::Kitchen, Some(Course::Main)),
    (Department::Kitchen, Some(Course::Dessert)),
];

/// Compute the send plan over the raw line table (qty-0 lines included —
/// their negative difference is exactly the cancellation to print).
pub fn compute_send_plan(lines: &BTreeMap<String, OrderLine>) -> SendPlan {
    let mut buckets: Vec<Vec<TicketLine>> = vec![Vec::new(); BUCKETS.len()];
    let mut markers = BTreeMap::new();

    for (key, line) in lines {
        let diff = line.qty - line.sent_qty();
        if diff == 0 {
            continue;
        }

        let ticket_line = TicketLine {
            name: if diff < 0 {
                format!("{}{}", STORNO_PREFIX, line.name)
            } else {
                line.name.clone()
            },
            size: line.size.clone(),
            qty: diff.abs(),
            note: line.note.clone(),
            storno: diff < 0,
        };

        let idx = bucket_index(line.dept, line.course);
        buckets[idx].push(ticket_line);
        markers.insert(key.clone(), line.qty);
    }

    let tickets = BUCKETS
        .iter()
        .zip(buckets)
        .filter(|(_, lines)| !lines.is_empty())
        .map(|((dept, course), lines)| TicketDelta {
            dept: *dept,
            course: *course,
            lines,
        })
        .collect();

    SendPlan { tickets, markers }
}

fn bucket_index(dept: Department, course: Option<Course>) -> usize {
    match (dept, course) {
        (Department::Bar, _) => 0,
        (Department::Kitchen, Some(Course::Starter)) => 1,
        // Kitchen lines without a course default to the main course
        (Department::Kitchen, Some(Course::Main) | None) => 2,
        (Department::Kitchen, Some(Course::Dessert)) => 3,
    }
}

/// Fold confirmed markers back into a line table (the cache-side twin of
/// the store's marker update)
pub fn apply_markers(lines: &mut BTreeMap<String, OrderLine>, markers: &BTreeMap<String, i32>) {
    for (key, qty) in markers {
        if let Some(line) = lines.get_mut(key) {
            line.ordered_qty = Some(*qty);
            line.printed_qty = Some(*qty);
        }
    }
}
