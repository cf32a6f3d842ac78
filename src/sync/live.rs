//! The client-side working set and the read model the UI renders from.
//!
//! One [`LiveStore`] per dashboard. It is an explicit handle, cloned into
//! whatever needs it (the engine, the removal timers); the UI only reads
//! snapshots and listens for [`ViewEvent`]s.

use super::{LowStockAlert, SyncError};
use crate::ledger::InventoryLedger;
use crate::model::{Customer, DashboardStats, MenuItem, Order, OrderId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

/// Change notifications for UI subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    OrderChanged(Order),
    OrderRemoved(OrderId),
    MenuChanged(MenuItem),
    LowStock(LowStockAlert),
    CommandFailed(SyncError),
    Refreshed,
}

#[derive(Debug, Default)]
struct LiveState {
    orders: BTreeMap<OrderId, Order>,
    ledger: InventoryLedger,
    customers: Vec<Customer>,
    stats: DashboardStats,
}

#[derive(Clone)]
pub struct LiveStore {
    state: Arc<RwLock<LiveState>>,
    events: broadcast::Sender<ViewEvent>,
}

impl LiveStore {
    pub fn new(view_capacity: usize) -> Self {
        let (events, _rx) = broadcast::channel(view_capacity);
        Self {
            state: Arc::new(RwLock::new(LiveState::default())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    pub fn notify(&self, event: ViewEvent) {
        // No UI attached is fine.
        let _ = self.events.send(event);
    }

    /// Live orders in placement order.
    pub async fn orders(&self) -> Vec<Order> {
        let state = self.state.read().await;
        let mut orders: Vec<Order> = state.orders.values().cloned().collect();
        orders.sort_by_key(|order| (order.placed_at, order.id));
        orders
    }

    pub async fn order(&self, id: OrderId) -> Option<Order> {
        self.state.read().await.orders.get(&id).cloned()
    }

    pub async fn menu(&self) -> Vec<MenuItem> {
        self.state.read().await.ledger.items()
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.state.read().await.customers.clone()
    }

    pub async fn stats(&self) -> DashboardStats {
        self.state.read().await.stats.clone()
    }

    /// Runs `f` against order `id` under the write lock and hands back its
    /// result with a snapshot of the order afterwards. `None` when the order
    /// is not in the working set.
    pub async fn with_order<R>(&self, id: OrderId, f: impl FnOnce(&mut Order) -> R) -> Option<(R, Order)> {
        let mut state = self.state.write().await;
        let order = state.orders.get_mut(&id)?;
        let result = f(order);
        Some((result, order.clone()))
    }

    pub async fn with_ledger<R>(&self, f: impl FnOnce(&mut InventoryLedger) -> R) -> R {
        let mut state = self.state.write().await;
        f(&mut state.ledger)
    }

    pub async fn insert_order(&self, order: Order) {
        debug!(order_id = %order.id, "Order entered working set");
        self.state.write().await.orders.insert(order.id, order.clone());
        self.notify(ViewEvent::OrderChanged(order));
    }

    pub async fn remove_order(&self, id: OrderId) -> Option<Order> {
        let removed = self.state.write().await.orders.remove(&id);
        if removed.is_some() {
            info!(order_id = %id, "Order left working set");
            self.notify(ViewEvent::OrderRemoved(id));
        }
        removed
    }

    /// Replaces orders, customers and stats wholesale.
    pub async fn replace_details(&self, orders: Vec<Order>, customers: Vec<Customer>, stats: DashboardStats) {
        {
            let mut state = self.state.write().await;
            state.orders = orders.into_iter().map(|order| (order.id, order)).collect();
            state.customers = customers;
            state.stats = stats;
        }
        self.notify(ViewEvent::Refreshed);
    }

    pub async fn replace_menu(&self, items: Vec<MenuItem>) {
        self.state.write().await.ledger.replace_all(items);
        self.notify(ViewEvent::Refreshed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, OrderLineItem, OrderStatus};
    use chrono::{Duration, Utc};

    fn order(id: u32, minutes_ago: i64) -> Order {
        Order::new(
            OrderId(id),
            CustomerId(1),
            vec![OrderLineItem::new("Miso", 1, 3.5)],
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[tokio::test]
    async fn test_orders_listed_in_placement_order() {
        let live = LiveStore::new(8);
        live.insert_order(order(2, 1)).await;
        live.insert_order(order(1, 5)).await;
        live.insert_order(order(3, 10)).await;

        let ids: Vec<u32> = live.orders().await.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_with_order_returns_snapshot_and_notifies_nothing() {
        let live = LiveStore::new(8);
        live.insert_order(order(1, 0)).await;
        let mut events = live.subscribe();

        let (previous, snapshot) = live
            .with_order(OrderId(1), |o| std::mem::replace(&mut o.status, OrderStatus::Ready))
            .await
            .unwrap();
        assert_eq!(previous, OrderStatus::Pending);
        assert_eq!(snapshot.status, OrderStatus::Ready);
        assert!(events.try_recv().is_err());

        assert!(live.with_order(OrderId(9), |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn test_replace_details_is_wholesale() {
        let live = LiveStore::new(8);
        live.insert_order(order(1, 0)).await;
        let mut events = live.subscribe();

        live.replace_details(vec![order(4, 0)], vec![], DashboardStats::default())
            .await;

        assert!(live.order(OrderId(1)).await.is_none());
        assert!(live.order(OrderId(4)).await.is_some());
        assert_eq!(events.recv().await.unwrap(), ViewEvent::Refreshed);
    }
}
