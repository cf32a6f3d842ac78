//! Error types for the customer table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    #[error("Customer name must not be empty")]
    EmptyName,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
