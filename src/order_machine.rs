//! # Order State Machine
//!
//! Order status moves `Pending → Preparing → Ready → Completed` and never
//! back. Two things move it:
//!
//! - [`recompute`], run after every item mutation, which can only push the
//!   order forward to `Preparing` or `Ready`;
//! - [`advance_order`], the explicit operator command, which is the only way
//!   into `Completed`.
//!
//! Once `Completed`, recomputation leaves the order alone even if late item
//! edits arrive.

use crate::error::TransitionError;
use crate::model::{ItemStatus, Order, OrderStatus};
use tracing::debug;

/// Result of an explicit status command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Unchanged,
    Advanced { from: OrderStatus, to: OrderStatus },
}

impl StatusChange {
    pub fn completed(&self) -> bool {
        matches!(
            self,
            StatusChange::Advanced {
                to: OrderStatus::Completed,
                ..
            }
        )
    }
}

/// Derives the order status from its items. Returns the new status when it
/// changed.
pub fn recompute(order: &mut Order) -> Option<OrderStatus> {
    let derived = match order.status {
        OrderStatus::Completed => None,
        current => {
            let all_done = !order.items.is_empty() && order.items.iter().all(|i| i.status.is_done());
            let any_cooking = order.items.iter().any(|i| i.status == ItemStatus::Cooking);
            if all_done && current != OrderStatus::Ready {
                Some(OrderStatus::Ready)
            } else if !all_done && any_cooking && current == OrderStatus::Pending {
                Some(OrderStatus::Preparing)
            } else {
                None
            }
        }
    };

    if let Some(status) = derived {
        debug!(order_id = %order.id, from = %order.status, to = %status, "Recomputed order status");
        order.status = status;
    }
    derived
}

/// Moves the order forward to `to`. Skipping intermediate states is allowed;
/// going back, or anywhere out of `Completed`, is not.
pub fn advance_order(order: &mut Order, to: OrderStatus) -> Result<StatusChange, TransitionError> {
    let from = order.status;
    if to == from {
        return Ok(StatusChange::Unchanged);
    }
    if to < from {
        return Err(TransitionError::InvalidOrderTransition {
            order_id: order.id,
            from,
            to,
        });
    }
    order.status = to;
    debug!(order_id = %order.id, %from, %to, "Advanced order");
    Ok(StatusChange::Advanced { from, to })
}
