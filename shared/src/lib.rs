//! Shared types for the Gasthaus POS workspace
//!
//! Persisted data models, the unified error type and money helpers used
//! across the printer and POS crates.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use error::{AppError, AppResult};
pub use serde::{Deserialize, Serialize};
