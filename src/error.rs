//! Local state-machine rejections.
//!
//! These never leave the client: a command that fails here is answered
//! immediately and nothing is written to the store.

use crate::model::{ItemStatus, OrderId, OrderStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("{order_id} item {index}: cannot move from {from} to {to}")]
    InvalidItemTransition {
        order_id: OrderId,
        index: usize,
        from: ItemStatus,
        to: ItemStatus,
    },

    #[error("{order_id}: cannot move from {from} to {to}")]
    InvalidOrderTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("{order_id} has no item at index {index}")]
    NoSuchItem { order_id: OrderId, index: usize },

    #[error("{order_id} item {index} is already served")]
    ItemServed { order_id: OrderId, index: usize },
}
