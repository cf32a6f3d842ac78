//! Error types for the menu table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Menu item key must not be empty")]
    EmptyKey,

    #[error("Menu table error: {0}")]
    TableError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
