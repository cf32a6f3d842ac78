//! # Menu/Inventory Ledger
//!
//! A client's local copy of per-item stock and availability, keyed by menu
//! key. Deductions are planned as pure [`StockChange`]s first so the caller
//! can persist them before the ledger commits to them.

use crate::model::{Availability, MenuItem, MenuItemId, MenuItemPatch};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),
}

/// A planned stock deduction for one menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub id: MenuItemId,
    pub key: String,
    pub before: u32,
    pub after: u32,
    pub threshold: u32,
    pub status: Availability,
}

impl StockChange {
    /// Remaining stock sits under the configured threshold.
    pub fn is_low(&self) -> bool {
        self.after < self.threshold
    }

    pub fn patch(&self) -> MenuItemPatch {
        MenuItemPatch {
            stock: Some(self.after),
            status: Some(self.status),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    items: BTreeMap<String, MenuItem>,
}

impl InventoryLedger {
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut ledger = Self::default();
        ledger.replace_all(items);
        ledger
    }

    pub fn get(&self, key: &str) -> Option<&MenuItem> {
        self.items.get(key)
    }

    /// Finds the menu item an order line refers to: by key, then by name.
    pub fn lookup(&self, name: &str) -> Option<&MenuItem> {
        self.items
            .get(name)
            .or_else(|| self.items.values().find(|item| item.matches(name)))
    }

    /// Plans taking `qty` units of `name` out of stock, floored at zero.
    /// Returns `None` when no menu item matches.
    pub fn plan_deduction(&self, name: &str, qty: u32) -> Option<StockChange> {
        let item = self.lookup(name)?;
        let after = item.stock.saturating_sub(qty);
        let status = if after == 0 {
            Availability::OutOfStock
        } else {
            item.status
        };
        Some(StockChange {
            id: item.id,
            key: item.key.clone(),
            before: item.stock,
            after,
            threshold: item.min_stock_threshold,
            status,
        })
    }

    /// Commits a planned change. Returns `false` if the item has vanished.
    pub fn apply(&mut self, change: &StockChange) -> bool {
        match self.items.get_mut(&change.key) {
            Some(item) => {
                item.stock = change.after;
                item.status = change.status;
                debug!(key = %change.key, before = change.before, after = change.after, "Stock deducted");
                true
            }
            None => false,
        }
    }

    /// Operator override of availability, independent of stock.
    pub fn set_availability(&mut self, key: &str, status: Availability) -> Result<(), LedgerError> {
        let item = self
            .items
            .get_mut(key)
            .ok_or_else(|| LedgerError::UnknownItem(key.to_string()))?;
        info!(%key, from = %item.status, to = %status, "Availability overridden");
        item.status = status;
        Ok(())
    }

    pub fn upsert(&mut self, item: MenuItem) {
        self.items.insert(item.key.clone(), item);
    }

    /// Stock/status update for an item identified by row id, as carried by
    /// broadcasts. Returns `false` when the id is unknown locally.
    pub fn set_stock(&mut self, id: MenuItemId, stock: u32, status: Availability) -> bool {
        match self.items.values_mut().find(|item| item.id == id) {
            Some(item) => {
                item.stock = stock;
                item.status = status;
                true
            }
            None => false,
        }
    }

    pub fn replace_all(&mut self, items: impl IntoIterator<Item = MenuItem>) {
        self.items = items
            .into_iter()
            .map(|item| (item.key.clone(), item))
            .collect();
    }

    /// Snapshot ordered by key.
    pub fn items(&self) -> Vec<MenuItem> {
        self.items.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
