//! Thermal ticket renderer
//!
//! Renders a [`Receipt`] into ESC/POS bytes. Layout: centered header,
//! date line, then a NEU block (bold) and a STORNO block (bold + inverted),
//! each only when non-empty. Item lines use a fixed quantity column with
//! word-wrapped names; continuation lines and notes indent to the name
//! column.

use gasthaus_printer::EscPosBuilder;

use super::types::{Receipt, TicketLine};

/// Width of the quantity column, "12x  " style
const QTY_COL: usize = 5;

/// Kitchen/bar ticket renderer for thermal printers
pub struct TicketRenderer {
    width: usize,
}

impl TicketRenderer {
    /// Common widths: 42 characters on 80mm paper, 32 on 58mm
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render a receipt to ESC/POS bytes
    pub fn render(&self, receipt: &Receipt) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, receipt);

        let new_lines: Vec<&TicketLine> = receipt.new_lines().collect();
        let storno_lines: Vec<&TicketLine> = receipt.storno_lines().collect();

        if !new_lines.is_empty() {
            b.line_centered("NEU");
            b.sep_single();
            b.bold();
            for line in &new_lines {
                self.render_item(&mut b, line);
            }
            b.bold_off();
            b.newline();
        }

        if !storno_lines.is_empty() {
            b.invert();
            b.bold();
            b.line_centered("STORNO");
            b.bold_off();
            b.invert_off();
            b.sep_single();

            b.invert();
            b.bold();
            for line in &storno_lines {
                self.render_item(&mut b, line);
            }
            b.bold_off();
            b.invert_off();
            b.newline();
        }

        b.newline();
        b.cut_feed(0x10);
        b.build()
    }

    fn render_header(&self, b: &mut EscPosBuilder, receipt: &Receipt) {
        b.center();
        b.bold();
        b.double_size();
        b.line(&receipt.title.to_uppercase());
        b.reset_size();
        b.bold_off();

        b.line(&receipt.room);
        b.line(&receipt.section);
        if !receipt.hint.is_empty() {
            b.line(&receipt.hint);
        }
        b.sep_single();

        b.left();
        b.line(&receipt.timestamp);
        b.newline();
    }

    /// Quantity column on the first line only, wrapped name indented after
    fn render_item(&self, b: &mut EscPosBuilder, line: &TicketLine) {
        let qty_col = format!("{:<width$}", format!("{}x", line.qty), width = QTY_COL);
        let indent = " ".repeat(QTY_COL);
        let name_width = self.width.saturating_sub(QTY_COL);

        for (i, chunk) in wrap_words(&line.display_name(), name_width).iter().enumerate() {
            if i == 0 {
                b.line(&format!("{}{}", qty_col, chunk));
            } else {
                b.line(&format!("{}{}", indent, chunk));
            }
        }

        if !line.note.is_empty() {
            for (i, chunk) in wrap_words(&line.note, name_width.saturating_sub(2))
                .iter()
                .enumerate()
            {
                if i == 0 {
                    b.line(&format!("{}* {}", indent, chunk));
                } else {
                    b.line(&format!("{}  {}", indent, chunk));
                }
            }
        }
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Greedy word wrap. A single word longer than the width gets its own
/// overlong line rather than being broken mid-word.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
