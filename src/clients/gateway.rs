//! [`FulfillmentStore`] over the in-process store tables.

use super::{CustomerClient, MenuClient, OrderClient};
use crate::customer_actor::CustomerError;
use crate::menu_actor::MenuError;
use crate::model::{
    Customer, DashboardStats, MenuItem, MenuItemId, MenuItemPatch, Order, OrderId, OrderPatch,
};
use crate::order_actor::OrderError;
use crate::sync::{FulfillmentStore, StoreError};
use async_trait::async_trait;
use table_actor::TableHandle;
use tracing::{instrument, trace};

impl From<OrderError> for StoreError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::ActorCommunicationError(msg) => StoreError::Unavailable(msg),
            other => StoreError::Rejected(other.to_string()),
        }
    }
}

impl From<MenuError> for StoreError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::ActorCommunicationError(msg) => StoreError::Unavailable(msg),
            other => StoreError::Rejected(other.to_string()),
        }
    }
}

impl From<CustomerError> for StoreError {
    fn from(e: CustomerError) -> Self {
        match e {
            CustomerError::ActorCommunicationError(msg) => StoreError::Unavailable(msg),
            other => StoreError::Rejected(other.to_string()),
        }
    }
}

/// What the sync layer talks to: one client per table.
#[derive(Clone)]
pub struct StoreGateway {
    orders: OrderClient,
    menu: MenuClient,
    customers: CustomerClient,
}

impl StoreGateway {
    pub fn new(orders: OrderClient, menu: MenuClient, customers: CustomerClient) -> Self {
        Self {
            orders,
            menu,
            customers,
        }
    }
}

#[async_trait]
impl FulfillmentStore for StoreGateway {
    async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(id).await?)
    }

    #[instrument(skip(self, patch))]
    async fn update_order(&self, id: OrderId, patch: OrderPatch) -> Result<u64, StoreError> {
        let patched = self.orders.patch_order(id, patch).await?;
        trace!(rows = patched.rows_affected, "Order patch answered");
        Ok(patched.rows_affected)
    }

    async fn fetch_live_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders = self.orders.list().await?;
        orders.retain(Order::is_live);
        Ok(orders)
    }

    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self.menu.list().await?)
    }

    #[instrument(skip(self, patch))]
    async fn update_menu_item(&self, id: MenuItemId, patch: MenuItemPatch) -> Result<u64, StoreError> {
        let patched = self.menu.patch_item(id, patch).await?;
        trace!(rows = patched.rows_affected, "Menu patch answered");
        Ok(patched.rows_affected)
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.customers.list().await?)
    }

    /// Counters over every order on record, completed history included.
    async fn fetch_stats(&self) -> Result<DashboardStats, StoreError> {
        let orders = self.orders.list().await?;
        Ok(DashboardStats::from_orders(&orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, OrderLineItem, OrderStatus};
    use chrono::Utc;
    use table_actor::mock::MockClient;
    use table_actor::{Patched, TableError};

    struct Mocks {
        orders: MockClient<Order>,
        menu: MockClient<MenuItem>,
        customers: MockClient<Customer>,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                orders: MockClient::new(),
                menu: MockClient::new(),
                customers: MockClient::new(),
            }
        }

        fn gateway(&self) -> StoreGateway {
            StoreGateway::new(
                OrderClient::new(self.orders.client()),
                MenuClient::new(self.menu.client()),
                CustomerClient::new(self.customers.client()),
            )
        }
    }

    fn order(id: u32, status: OrderStatus) -> Order {
        let mut order = Order::new(
            OrderId(id),
            CustomerId(1),
            vec![OrderLineItem::new("Laksa", 1, 10.0)],
            Utc::now(),
        );
        order.status = status;
        order
    }

    #[tokio::test]
    async fn test_live_orders_exclude_completed() {
        let mut mocks = Mocks::new();
        mocks.orders.expect_list().return_ok(vec![
            order(1, OrderStatus::Pending),
            order(2, OrderStatus::Completed),
            order(3, OrderStatus::Ready),
        ]);

        let live = mocks.gateway().fetch_live_orders().await.unwrap();
        let ids: Vec<OrderId> = live.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(1), OrderId(3)]);
        mocks.orders.verify();
    }

    #[tokio::test]
    async fn test_stats_include_history() {
        let mut mocks = Mocks::new();
        mocks.orders.expect_list().return_ok(vec![
            order(1, OrderStatus::Completed),
            order(2, OrderStatus::Preparing),
        ]);

        let stats = mocks.gateway().fetch_stats().await.unwrap();
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.preparing, 1);
        assert_eq!(stats.revenue, 10.0);
    }

    #[tokio::test]
    async fn test_blocked_patch_reports_zero_rows() {
        let mut mocks = Mocks::new();
        mocks
            .orders
            .expect_update(OrderId(4))
            .return_ok(Patched::untouched());
        mocks
            .menu
            .expect_update(MenuItemId(1))
            .return_ok(Patched::untouched());

        let gateway = mocks.gateway();
        let rows = gateway
            .update_order(OrderId(4), OrderPatch::status(OrderStatus::Ready))
            .await
            .unwrap();
        assert_eq!(rows, 0);

        let rows = gateway
            .update_menu_item(MenuItemId(1), MenuItemPatch::default())
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let mut mocks = Mocks::new();
        mocks
            .orders
            .expect_get(OrderId(1))
            .return_err(TableError::ActorClosed);
        mocks
            .orders
            .expect_update(OrderId(1))
            .return_err(TableError::RowError(Box::new(OrderError::InvalidPatch {
                order_id: "order_1".into(),
                reason: "line items changed".into(),
            })));

        let gateway = mocks.gateway();
        let err = gateway.fetch_order(OrderId(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        let err = gateway
            .update_order(OrderId(1), OrderPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }
}
