//! Paged (A4) receipt rendering
//!
//! Renders the same logical receipt content into a fixed-size page canvas
//! of positioned text spans, consumed by the platform print spooler (an
//! external collaborator — this module stops at the document model).

use super::types::{Receipt, TicketLine};

/// A4 at 72 dpi
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

const MARGIN_LEFT: f32 = 40.0;
const MARGIN_RIGHT: f32 = 40.0;
const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 60.0;

/// Column where item text starts (after the quantity column)
const NAME_COLUMN_X: f32 = 110.0;
const BODY_LINE_HEIGHT: f32 = 30.0;
const BODY_FONT_SIZE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One positioned run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub align: Align,
    pub text: String,
}

/// Drawable page content
#[derive(Debug, Clone, PartialEq)]
pub enum PageElement {
    Text(TextSpan),
    Rule { x1: f32, x2: f32, y: f32 },
}

/// One fixed-size page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<PageElement>,
}

/// The finished print job for the spooler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedDocument {
    pub pages: Vec<Page>,
}

/// Renders receipts into positioned-line page documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRenderer;

impl PageRenderer {
    pub fn new() -> Self {
        Self
    }

    /// One receipt per page run, page-breaking on overflow
    pub fn render(&self, receipt: &Receipt) -> PagedDocument {
        let mut doc = PagedDocument::default();
        let mut page = Page::default();
        let mut y = self.render_header(&mut page, receipt);

        for line in &receipt.lines {
            if y > BOTTOM_LIMIT {
                doc.pages.push(std::mem::take(&mut page));
                y = self.render_header(&mut page, receipt);
            }
            self.render_item(&mut page, line, y);
            y += BODY_LINE_HEIGHT;
        }

        doc.pages.push(page);
        doc
    }

    /// The bar/kitchen pair: one job whose first page is the bar section
    /// and whose second page is the kitchen section, matching the two-tray
    /// paper setup at the counter. Sections without content still get
    /// their (empty) page so the tray mapping stays fixed.
    pub fn render_pair(&self, bar: &Receipt, kitchen: &Receipt) -> PagedDocument {
        let mut doc = PagedDocument::default();
        for receipt in [bar, kitchen] {
            let rendered = self.render(receipt);
            doc.pages.extend(rendered.pages);
        }
        doc
    }

    /// Header block; returns the y cursor where the body starts
    fn render_header(&self, page: &mut Page, receipt: &Receipt) -> f32 {
        let center_x = PAGE_WIDTH / 2.0;
        let mut y = 80.0;

        page.elements.push(PageElement::Text(TextSpan {
            x: center_x,
            y,
            size: 44.0,
            bold: true,
            align: Align::Center,
            text: receipt.title.clone(),
        }));

        y += 42.0;
        page.elements.push(PageElement::Text(TextSpan {
            x: center_x,
            y,
            size: 20.0,
            bold: false,
            align: Align::Center,
            text: receipt.room.clone(),
        }));

        y += 28.0;
        let section = if receipt.hint.is_empty() {
            receipt.section.clone()
        } else {
            format!("{} — {}", receipt.section, receipt.hint)
        };
        page.elements.push(PageElement::Text(TextSpan {
            x: center_x,
            y,
            size: 18.0,
            bold: false,
            align: Align::Center,
            text: section,
        }));

        y += 22.0;
        page.elements.push(PageElement::Rule {
            x1: MARGIN_LEFT,
            x2: PAGE_WIDTH - MARGIN_RIGHT,
            y,
        });

        y += 28.0;
        page.elements.push(PageElement::Text(TextSpan {
            x: MARGIN_LEFT,
            y,
            size: 16.0,
            bold: false,
            align: Align::Left,
            text: receipt.timestamp.clone(),
        }));

        y + 38.0
    }

    /// Two columns: quantity, then name. Cancellations render bold.
    fn render_item(&self, page: &mut Page, line: &TicketLine, y: f32) {
        page.elements.push(PageElement::Text(TextSpan {
            x: MARGIN_LEFT,
            y,
            size: BODY_FONT_SIZE,
            bold: line.storno,
            align: Align::Left,
            text: format!("{}x", line.qty),
        }));

        let mut text = line.display_name();
        if !line.note.is_empty() {
            text.push_str(&format!("  ({})", line.note));
        }
        page.elements.push(PageElement::Text(TextSpan {
            x: NAME_COLUMN_X,
            y,
            size: BODY_FONT_SIZE,
            bold: line.storno,
            align: Align::Left,
            text,
        }));
    }
}
