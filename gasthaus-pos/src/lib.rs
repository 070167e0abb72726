//! # gasthaus-pos
//!
//! Point-of-sale core for a table-service restaurant: accordion menu
//! browsing, order editing with delta-based bar/kitchen ticketing, split
//! billing, close-out archiving and floor-plan management.
//!
//! The backing store, the UI toolkit and the platform print spooler are
//! external collaborators: this crate exposes the data models, the pure
//! state machines, the receipt renderers and a [`session::TableSession`]
//! control loop that wires them together over the store's snapshot
//! streams.

pub mod config;
pub mod floor;
pub mod logging;
pub mod menu;
pub mod orders;
pub mod printing;
pub mod session;
pub mod store;

// Re-exports
pub use config::{Config, PrintMode};
pub use logging::{init_logger, setup_environment};
pub use session::{SessionCommand, SessionEvent, TableSession};
