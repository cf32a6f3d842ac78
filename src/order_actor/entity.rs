//! [`Row`] implementation for [`Order`] and the order table's write policy.

use super::OrderError;
use crate::model::{Order, OrderCreate, OrderId, OrderPatch};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use table_actor::Row;
use tracing::info;

/// Row-level write policy for the order table.
///
/// Locked orders refuse patches; the table reports zero rows affected. Used
/// to model a store permission rule that blocks a dashboard's write.
#[derive(Debug, Clone, Default)]
pub struct WritePolicy {
    locked: Arc<RwLock<HashSet<OrderId>>>,
}

impl WritePolicy {
    pub fn lock(&self, id: OrderId) {
        info!(order_id = %id, "Order locked against writes");
        self.locked
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
    }

    pub fn unlock(&self, id: OrderId) {
        self.locked
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    pub fn is_locked(&self, id: OrderId) -> bool {
        self.locked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }
}

#[async_trait]
impl Row for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderPatch;
    type Action = ();
    type ActionResult = ();
    type Context = WritePolicy;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(item) = params.items.iter().find(|item| item.qty == 0) {
            return Err(OrderError::InvalidQuantity {
                item: item.name.clone(),
                qty: item.qty,
            });
        }
        Ok(Order::new(id, params.customer, params.items, params.placed_at))
    }

    fn permits_update(&self, _update: &OrderPatch, policy: &WritePolicy) -> bool {
        !policy.is_locked(self.id)
    }

    async fn on_update(&mut self, patch: OrderPatch, _policy: &WritePolicy) -> Result<(), OrderError> {
        if let Some(items) = patch.items {
            let same_lines = items.len() == self.items.len()
                && items
                    .iter()
                    .zip(&self.items)
                    .all(|(new, old)| new.name == old.name && new.qty == old.qty && new.notes == old.notes);
            if !same_lines {
                return Err(OrderError::InvalidPatch {
                    order_id: self.id.to_string(),
                    reason: "line items are fixed at placement".into(),
                });
            }
            self.items = items;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _policy: &WritePolicy) -> Result<(), OrderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, ItemStatus, OrderLineItem, OrderStatus};
    use chrono::Utc;

    fn placed() -> Order {
        Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer: CustomerId(1),
                items: vec![OrderLineItem::new("Tteokbokki", 2, 8.0).with_notes("mild")],
                placed_at: Utc::now(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_patch_may_not_change_what_was_ordered() {
        let mut order = placed();
        let mut items = order.items.clone();
        items[0].qty = 3;

        let err = order
            .on_update(
                OrderPatch {
                    status: None,
                    items: Some(items),
                },
                &WritePolicy::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidPatch { .. }));
        assert_eq!(order.items[0].qty, 2);
    }

    #[tokio::test]
    async fn test_patch_carries_kitchen_progress() {
        let mut order = placed();
        let mut items = order.items.clone();
        items[0].status = ItemStatus::Cooking;

        order
            .on_update(
                OrderPatch {
                    status: Some(OrderStatus::Preparing),
                    items: Some(items),
                },
                &WritePolicy::default(),
            )
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.items[0].status, ItemStatus::Cooking);
    }

    #[test]
    fn test_locked_orders_refuse_writes() {
        let order = placed();
        let policy = WritePolicy::default();
        assert!(order.permits_update(&OrderPatch::default(), &policy));

        policy.lock(order.id);
        assert!(!order.permits_update(&OrderPatch::default(), &policy));
        policy.unlock(order.id);
        assert!(!policy.is_locked(order.id));
    }
}
