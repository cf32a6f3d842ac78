//! The durable store as the synchronization layer sees it.

use super::StoreError;
use crate::model::{
    Customer, DashboardStats, MenuItem, MenuItemId, MenuItemPatch, Order, OrderId, OrderPatch,
};
use async_trait::async_trait;

/// Fetch-by-id, partial patch with a rows-affected count, and the listings
/// a refresh needs.
///
/// A patch that matches nothing, or that a row-level policy blocks, is not
/// an error: it returns `Ok(0)`.
#[async_trait]
pub trait FulfillmentStore: Send + Sync {
    async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn update_order(&self, id: OrderId, patch: OrderPatch) -> Result<u64, StoreError>;

    /// Every order not yet completed.
    async fn fetch_live_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, StoreError>;

    async fn update_menu_item(&self, id: MenuItemId, patch: MenuItemPatch) -> Result<u64, StoreError>;

    async fn fetch_customers(&self) -> Result<Vec<Customer>, StoreError>;

    async fn fetch_stats(&self) -> Result<DashboardStats, StoreError>;
}
