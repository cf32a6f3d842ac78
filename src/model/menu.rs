//! Menu items as far as fulfillment cares: stock and availability.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for menu rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "menu_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Limited,
    OutOfStock,
}

impl Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Availability::Available => "available",
            Availability::Limited => "limited",
            Availability::OutOfStock => "out_of_stock",
        };
        f.write_str(label)
    }
}

/// A sellable dish with its stock level.
///
/// `status` is not derived from `stock`: an operator may set it by hand, and
/// the two are only reconciled when a completed order deducts stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    /// Unique lookup key, e.g. `"ramen"`.
    pub key: String,
    pub name: String,
    pub stock: u32,
    pub min_stock_threshold: u32,
    pub status: Availability,
}

impl MenuItem {
    pub fn is_low(&self) -> bool {
        self.stock < self.min_stock_threshold
    }

    /// True when an order line named `name` refers to this item.
    pub fn matches(&self, name: &str) -> bool {
        self.key == name || self.name == name
    }
}

#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub key: String,
    pub name: String,
    pub stock: u32,
    pub min_stock_threshold: u32,
    pub status: Availability,
}

impl MenuItemCreate {
    pub fn new(key: impl Into<String>, name: impl Into<String>, stock: u32, min_stock_threshold: u32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            stock,
            min_stock_threshold,
            status: Availability::Available,
        }
    }
}

/// Partial patch sent to the menu table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPatch {
    pub stock: Option<u32>,
    pub status: Option<Availability>,
}
