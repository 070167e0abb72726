//! Printable artifact types
//!
//! A [`Receipt`] is a point-in-time, immutable snapshot: created per print
//! action, consumed by a renderer plus transport, then discarded. Nothing
//! here is ever stored.

use chrono::{DateTime, Local};
use shared::models::{Course, Department};

/// Prefix flagging a cancellation line on the ticket
pub const STORNO_PREFIX: &str = "STORNO: ";

/// One printable line of a ticket
#[derive(Debug, Clone, PartialEq)]
pub struct TicketLine {
    pub name: String,
    pub size: String,
    pub qty: i32,
    pub note: String,
    pub storno: bool,
}

impl TicketLine {
    /// Item name plus parenthesised size, as printed
    pub fn display_name(&self) -> String {
        if self.size.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.size)
        }
    }
}

/// The un-sent difference for one destination bucket. Bar lines carry no
/// course; kitchen lines are split per course so a starter ticket can fire
/// independently of the mains.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDelta {
    pub dept: Department,
    pub course: Option<Course>,
    pub lines: Vec<TicketLine>,
}

impl TicketDelta {
    /// Section headline printed on the ticket
    pub fn section_title(&self) -> &'static str {
        match self.dept {
            Department::Bar => "THEKE / GETRÄNKE",
            Department::Kitchen => "KÜCHE / SPEISEN",
        }
    }

    /// Course banner for kitchen tickets ("" for bar)
    pub fn ticket_hint(&self) -> &'static str {
        match (self.dept, self.course) {
            (Department::Kitchen, Some(Course::Starter)) => "VORSPEISENBON",
            (Department::Kitchen, Some(Course::Dessert)) => "NACHSPEISENBON",
            (Department::Kitchen, _) => "SPEISENBON",
            (Department::Bar, _) => "",
        }
    }
}

/// A complete printable receipt
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Centered headline, e.g. "Tisch 7"
    pub title: String,
    /// Room name, e.g. "Saal"
    pub room: String,
    /// Section headline, e.g. "THEKE / GETRÄNKE"
    pub section: String,
    /// Course banner, empty for bar tickets
    pub hint: String,
    /// Pre-formatted generation time, e.g. "13.02.2026  01:23"
    pub timestamp: String,
    pub lines: Vec<TicketLine>,
}

impl Receipt {
    /// Assemble a receipt for one delta bucket
    pub fn for_delta(
        table_id: &str,
        room: &str,
        delta: &TicketDelta,
        at: DateTime<Local>,
    ) -> Receipt {
        Receipt {
            title: format!("Tisch {}", table_id),
            room: room.to_string(),
            section: delta.section_title().to_string(),
            hint: delta.ticket_hint().to_string(),
            timestamp: at.format("%d.%m.%Y  %H:%M").to_string(),
            lines: delta.lines.clone(),
        }
    }

    /// New lines (positive delta)
    pub fn new_lines(&self) -> impl Iterator<Item = &TicketLine> {
        self.lines.iter().filter(|l| !l.storno)
    }

    /// Cancelled lines
    pub fn storno_lines(&self) -> impl Iterator<Item = &TicketLine> {
        self.lines.iter().filter(|l| l.storno)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_name_with_size() {
        let line = TicketLine {
            name: "Wasser still".into(),
            size: "0,5l".into(),
            qty: 3,
            note: String::new(),
            storno: false,
        };
        assert_eq!(line.display_name(), "Wasser still (0,5l)");
    }

    #[test]
    fn test_ticket_hints() {
        let delta = TicketDelta {
            dept: Department::Kitchen,
            course: Some(Course::Starter),
            lines: vec![],
        };
        assert_eq!(delta.ticket_hint(), "VORSPEISENBON");

        let bar = TicketDelta {
            dept: Department::Bar,
            course: None,
            lines: vec![],
        };
        assert_eq!(bar.ticket_hint(), "");
        assert_eq!(bar.section_title(), "THEKE / GETRÄNKE");
    }

    #[test]
    fn test_receipt_timestamp_format() {
        let at = Local.with_ymd_and_hms(2026, 2, 13, 1, 23, 0).unwrap();
        let delta = TicketDelta {
            dept: Department::Bar,
            course: None,
            lines: vec![],
        };
        let receipt = Receipt::for_delta("7", "Saal", &delta, at);
        assert_eq!(receipt.title, "Tisch 7");
        assert_eq!(receipt.timestamp, "13.02.2026  01:23");
    }
}
