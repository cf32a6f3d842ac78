//! Error types for the order table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order has no line items")]
    EmptyOrder,

    /// Quantities must be positive.
    #[error("Invalid quantity {qty} for {item}")]
    InvalidQuantity { item: String, qty: u32 },

    /// Patches may change status, chef and timestamps, not what was ordered.
    #[error("Invalid patch for {order_id}: {reason}")]
    InvalidPatch { order_id: String, reason: String },

    #[error("Order table error: {0}")]
    TableError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
