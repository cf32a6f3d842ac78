//! # Order Client
//!
//! Typed access to the order table.
use crate::model::{Order, OrderCreate, OrderId, OrderPatch};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use table_actor::{Patched, TableClient, TableError, TableHandle};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<Order>,
}

impl OrderClient {
    pub fn new(inner: TableClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(customer = %params.customer, items = params.items.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn patch_order(&self, id: OrderId, patch: OrderPatch) -> Result<Patched<Order>, OrderError> {
        debug!("Sending patch");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl TableHandle<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<Order> {
        &self.inner
    }

    fn map_error(e: TableError) -> OrderError {
        match e {
            TableError::RowError(source) => match source.downcast::<OrderError>() {
                Ok(row_error) => *row_error,
                Err(other) => OrderError::TableError(other.to_string()),
            },
            TableError::NotFound(id) => OrderError::TableError(format!("{id} not found")),
            transport => OrderError::ActorCommunicationError(transport.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, OrderLineItem, OrderStatus};
    use chrono::Utc;
    use table_actor::mock::MockClient;

    fn order(id: u32) -> Order {
        Order::new(
            OrderId(id),
            CustomerId(1),
            vec![OrderLineItem::new("Bibimbap", 1, 11.0)],
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_place_order() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create().return_ok(OrderId(1));

        let client = OrderClient::new(mock.client());
        let id = client
            .place_order(OrderCreate {
                customer: CustomerId(1),
                items: vec![OrderLineItem::new("Bibimbap", 1, 11.0)],
                placed_at: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(id, OrderId(1));
        mock.verify();
    }

    #[tokio::test]
    async fn test_row_errors_come_back_typed() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create()
            .return_err(TableError::RowError(Box::new(OrderError::EmptyOrder)));

        let client = OrderClient::new(mock.client());
        let err = client
            .place_order(OrderCreate {
                customer: CustomerId(1),
                items: vec![],
                placed_at: Utc::now(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, OrderError::EmptyOrder);
        mock.verify();
    }

    #[tokio::test]
    async fn test_patch_and_get() {
        let mut mock = MockClient::<Order>::new();
        let mut ready = order(3);
        ready.status = OrderStatus::Ready;
        mock.expect_update(OrderId(3)).return_ok(Patched::applied(ready.clone()));
        mock.expect_get(OrderId(3)).return_ok(Some(ready));

        let client = OrderClient::new(mock.client());
        let patched = client
            .patch_order(OrderId(3), OrderPatch::status(OrderStatus::Ready))
            .await
            .unwrap();
        assert!(patched.is_applied());

        let fetched = client.get(OrderId(3)).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Ready);
        mock.verify();
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_err(TableError::ActorClosed);

        let client = OrderClient::new(mock.client());
        let err = client.list().await.unwrap_err();
        assert!(matches!(err, OrderError::ActorCommunicationError(_)));
    }
}
