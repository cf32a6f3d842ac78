//! # Table Errors
//!
//! Plumbing failures shared by every table actor and client. Row-level
//! validation failures travel inside [`TableError::RowError`] so callers can
//! still downcast to the row's own error type.

/// Errors that can occur inside the table runtime itself.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table actor closed")]
    ActorClosed,
    #[error("Table actor dropped response channel")]
    ActorDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Row error: {0}")]
    RowError(Box<dyn std::error::Error + Send + Sync>),
}

impl TableError {
    /// True when the failure came from the transport rather than the row.
    pub fn is_transport(&self) -> bool {
        matches!(self, TableError::ActorClosed | TableError::ActorDropped)
    }
}
