//! # gasthaus-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - ISO-8859-15 encoding for European printers (umlauts, ß, €)
//! - Network printing (TCP port 9100)
//!
//! Business logic (WHAT to print) stays in application code: receipt and
//! ticket rendering live in `gasthaus-pos`.
//!
//! ## Example
//!
//! ```ignore
//! use gasthaus_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(42);
//! builder.center();
//! builder.double_size();
//! builder.line("TISCH 7");
//! builder.reset_size();
//! builder.sep_single();
//! builder.left();
//! builder.line("3x   Krombacher Pils (0,3l)");
//! builder.cut();
//!
//! // Send to network printer
//! let printer = NetworkPrinter::new("192.168.178.126", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{convert_to_latin9, latin_width, pad_latin, truncate_latin};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{NetworkPrinter, Printer};
