//! Receipt rendering: thermal ESC/POS tickets and the paged A4 document

pub mod page;
pub mod ticket;
pub mod types;

pub use page::{Page, PageElement, PagedDocument, PageRenderer, TextSpan};
pub use ticket::{TicketRenderer, wrap_words};
pub use types::{Receipt, STORNO_PREFIX, TicketDelta, TicketLine};
