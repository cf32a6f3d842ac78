//! Cross-client broadcast: what dashboards tell each other after a
//! successful write.

use crate::model::{Availability, MenuItemId, Order, OrderId, OrderLineItem, OrderStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

/// Identifies one connected dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Origin used for orders arriving from the ordering channel.
    pub fn ordering_channel() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client_{}", self.0.simple())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Orders,
    Menu,
    Alerts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub menu_item_id: MenuItemId,
    pub key: String,
    pub stock: u32,
    pub threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    OrderPlaced {
        order: Order,
    },
    OrderUpdated {
        order_id: OrderId,
        status: OrderStatus,
        items: Vec<OrderLineItem>,
    },
    MenuStockChanged {
        menu_item_id: MenuItemId,
        key: String,
        stock: u32,
        status: Availability,
    },
    LowStock(LowStockAlert),
}

impl SyncEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SyncEvent::OrderPlaced { .. } | SyncEvent::OrderUpdated { .. } => Topic::Orders,
            SyncEvent::MenuStockChanged { .. } => Topic::Menu,
            SyncEvent::LowStock(_) => Topic::Alerts,
        }
    }

    pub fn order_updated(order: &Order) -> Self {
        SyncEvent::OrderUpdated {
            order_id: order.id,
            status: order.status,
            items: order.items.clone(),
        }
    }
}

/// A published event together with who sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub origin: ClientId,
    pub topic: Topic,
    pub event: SyncEvent,
}

/// Pub/sub collaborator. Delivery is best effort; a publish with nobody
/// listening is not an error.
pub trait Broadcaster: Send + Sync {
    fn publish(&self, origin: ClientId, event: SyncEvent);

    fn subscribe(&self) -> broadcast::Receiver<Envelope>;
}

/// [`Broadcaster`] on a Tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastBus {
    sender: broadcast::Sender<Envelope>,
}

impl BroadcastBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _rx) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl Broadcaster for BroadcastBus {
    fn publish(&self, origin: ClientId, event: SyncEvent) {
        let topic = event.topic();
        let receivers = self
            .sender
            .send(Envelope {
                origin,
                topic,
                event,
            })
            .unwrap_or(0);
        trace!(%origin, ?topic, receivers, "Published");
    }

    fn subscribe(&self) -> broadcast::Receiver<Envelope> {
        self.sender.subscribe()
    }
}
