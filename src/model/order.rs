//! Orders and their line items.
//!
//! # Table Row
//! [`Order`] implements [`Row`](table_actor::Row) (see
//! [`order_actor::entity`](crate::order_actor::entity)), so the order table is
//! served by a [`TableActor`](table_actor::TableActor).
use crate::model::CustomerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Staff member a line item is assigned to. A label only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChefId(pub String);

impl ChefId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ChefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order-level status. Declaration order is the only direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Cooking lifecycle of a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemStatus {
    Pending,
    Cooking,
    Ready,
    Served,
}

impl ItemStatus {
    /// The only status this one may move to.
    pub fn next(self) -> Option<ItemStatus> {
        match self {
            ItemStatus::Pending => Some(ItemStatus::Cooking),
            ItemStatus::Cooking => Some(ItemStatus::Ready),
            ItemStatus::Ready => Some(ItemStatus::Served),
            ItemStatus::Served => None,
        }
    }

    /// Ready or Served: nothing left for the kitchen to do.
    pub fn is_done(self) -> bool {
        matches!(self, ItemStatus::Ready | ItemStatus::Served)
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Cooking => "cooking",
            ItemStatus::Ready => "ready",
            ItemStatus::Served => "served",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub name: String,
    pub qty: u32,
    pub unit_price: f64,
    pub status: ItemStatus,
    pub chef: Option<ChefId>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Kitchen instruction, fixed at placement.
    pub notes: String,
}

impl OrderLineItem {
    /// A fresh, unassigned, pending line.
    pub fn new(name: impl Into<String>, qty: u32, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            qty,
            unit_price,
            status: ItemStatus::Pending,
            chef: None,
            started_at: None,
            completed_at: None,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn line_total(&self) -> f64 {
        f64::from(self.qty) * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerId,
    pub items: Vec<OrderLineItem>,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new pending Order.
    ///
    /// Line items are reset to their placement state regardless of what the
    /// caller passed in; notes are kept.
    pub fn new(
        id: OrderId,
        customer: CustomerId,
        items: Vec<OrderLineItem>,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let items = items
            .into_iter()
            .map(|item| OrderLineItem::new(item.name, item.qty, item.unit_price).with_notes(item.notes))
            .collect();
        Self {
            id,
            customer,
            items,
            status: OrderStatus::Pending,
            placed_at,
        }
    }

    /// Whole minutes since placement, never negative.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.placed_at).num_minutes().max(0)
    }

    pub fn is_live(&self) -> bool {
        self.status != OrderStatus::Completed
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderLineItem::line_total).sum()
    }
}

/// Payload the ordering channel uses to place an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: CustomerId,
    pub items: Vec<OrderLineItem>,
    pub placed_at: DateTime<Utc>,
}

/// Partial patch sent to the order table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub items: Option<Vec<OrderLineItem>>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            items: None,
        }
    }

    /// Patch carrying the whole post-mutation state of an order.
    pub fn snapshot(order: &Order) -> Self {
        Self {
            status: Some(order.status),
            items: Some(order.items.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.items.is_none()
    }
}
