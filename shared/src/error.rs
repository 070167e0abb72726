//! Unified error type for the POS workspace
//!
//! Every failure path in the core maps onto [`AppError`]. Nothing here is
//! fatal: each variant leaves the system in a state consistent with
//! "nothing happened", so the caller can surface a notification and retry.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Backing store rejected or lost an operation
    #[error("Store error: {0}")]
    Store(String),

    /// Input rejected before any mutation was issued
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Entity with the same identity already exists
    #[error("{0} already exists")]
    Conflict(String),

    /// Printer transport failure (the un-sent delta stays pending)
    #[error("Print failed: {0}")]
    Print(String),

    /// Unexpected internal state
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    // ========== Convenient constructors ==========

    /// Create a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a Conflict error
    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict(resource.into())
    }

    /// Create a Print error
    pub fn print(message: impl Into<String>) -> Self {
        Self::Print(message.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether a retry of the same operation can succeed without user input
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Print(_))
    }
}

/// Result type for POS operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AppError::not_found("Tisch 7").to_string(),
            "Tisch 7 not found"
        );
        assert_eq!(
            AppError::conflict("Tisch 7").to_string(),
            "Tisch 7 already exists"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AppError::print("connection refused").is_retryable());
        assert!(AppError::store("disconnected").is_retryable());
        assert!(!AppError::validation("empty order").is_retryable());
    }
}
