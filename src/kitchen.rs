//! # Kitchen Item State Tracker
//!
//! Per-line cooking lifecycle (`Pending → Cooking → Ready → Served`, one step
//! at a time) and chef assignment. Every real item mutation is followed by
//! [`order_machine::recompute`](crate::order_machine::recompute).

use crate::error::TransitionError;
use crate::model::{ChefId, ItemStatus, Order, OrderStatus};
use crate::order_machine;
use chrono::{DateTime, Utc};
use tracing::debug;

/// What an item command did to the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChange {
    /// The requested state was already in place. Nothing was touched.
    Unchanged,
    /// The item changed; `order_status` is set when recomputation moved the order.
    Applied { order_status: Option<OrderStatus> },
}

impl ItemChange {
    pub fn is_applied(&self) -> bool {
        matches!(self, ItemChange::Applied { .. })
    }
}

/// Moves item `index` to `to`, stamping `started_at`/`completed_at` on entry
/// to `Cooking`/`Ready`.
pub fn set_item_status(
    order: &mut Order,
    index: usize,
    to: ItemStatus,
    now: DateTime<Utc>,
) -> Result<ItemChange, TransitionError> {
    let order_id = order.id;
    let item = order
        .items
        .get_mut(index)
        .ok_or(TransitionError::NoSuchItem { order_id, index })?;

    let from = item.status;
    if from == to {
        return Ok(ItemChange::Unchanged);
    }
    if from.next() != Some(to) {
        return Err(TransitionError::InvalidItemTransition {
            order_id,
            index,
            from,
            to,
        });
    }

    item.status = to;
    match to {
        ItemStatus::Cooking => {
            item.started_at.get_or_insert(now);
        }
        ItemStatus::Ready => {
            item.completed_at.get_or_insert(now);
        }
        _ => {}
    }
    debug!(%order_id, index, %from, %to, "Item status set");

    let order_status = order_machine::recompute(order);
    Ok(ItemChange::Applied { order_status })
}

/// Labels item `index` with `chef`. Served items are closed to reassignment.
pub fn assign_chef(
    order: &mut Order,
    index: usize,
    chef: ChefId,
) -> Result<ItemChange, TransitionError> {
    let order_id = order.id;
    let item = order
        .items
        .get_mut(index)
        .ok_or(TransitionError::NoSuchItem { order_id, index })?;

    if item.status == ItemStatus::Served {
        return Err(TransitionError::ItemServed { order_id, index });
    }
    if item.chef.as_ref() == Some(&chef) {
        return Ok(ItemChange::Unchanged);
    }
    debug!(%order_id, index, %chef, "Chef assigned");
    item.chef = Some(chef);
    Ok(ItemChange::Applied { order_status: None })
}
