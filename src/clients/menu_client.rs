//! # Menu Client
use crate::menu_actor::{MenuAction, MenuActionResult, MenuError};
use crate::model::{Availability, MenuItem, MenuItemCreate, MenuItemId, MenuItemPatch};
use async_trait::async_trait;
use table_actor::{Patched, TableClient, TableError, TableHandle};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct MenuClient {
    inner: TableClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: TableClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(key = %params.key))]
    pub async fn add_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(menu_item_id = %id, "Menu item added");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn patch_item(&self, id: MenuItemId, patch: MenuItemPatch) -> Result<Patched<MenuItem>, MenuError> {
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Current stock and availability.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: MenuItemId) -> Result<(u32, Availability), MenuError> {
        match self
            .inner
            .perform_action(id, MenuAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            MenuActionResult::CheckStock { stock, status } => Ok((stock, status)),
            other => Err(MenuError::TableError(format!("unexpected result {other:?}"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_availability(&self, id: MenuItemId, status: Availability) -> Result<(), MenuError> {
        self.inner
            .perform_action(id, MenuAction::SetAvailability(status))
            .await
            .map_err(Self::map_error)?;
        info!(menu_item_id = %id, %status, "Availability overridden");
        Ok(())
    }
}

#[async_trait]
impl TableHandle<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &TableClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: TableError) -> MenuError {
        match e {
            TableError::RowError(source) => match source.downcast::<MenuError>() {
                Ok(row_error) => *row_error,
                Err(other) => MenuError::TableError(other.to_string()),
            },
            TableError::NotFound(id) => MenuError::TableError(format!("{id} not found")),
            transport => MenuError::ActorCommunicationError(transport.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_actor::mock::MockClient;

    #[tokio::test]
    async fn test_check_stock() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_action(MenuItemId(2)).return_ok(MenuActionResult::CheckStock {
            stock: 4,
            status: Availability::Limited,
        });

        let client = MenuClient::new(mock.client());
        let (stock, status) = client.check_stock(MenuItemId(2)).await.unwrap();

        assert_eq!(stock, 4);
        assert_eq!(status, Availability::Limited);
        mock.verify();
    }

    #[tokio::test]
    async fn test_set_availability() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_action(MenuItemId(3))
            .return_ok(MenuActionResult::SetAvailability(Availability::OutOfStock));

        let client = MenuClient::new(mock.client());
        client
            .set_availability(MenuItemId(3), Availability::OutOfStock)
            .await
            .unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_item_rejected() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_create()
            .return_err(TableError::RowError(Box::new(MenuError::EmptyKey)));

        let client = MenuClient::new(mock.client());
        let err = client
            .add_item(MenuItemCreate::new(" ", "Nothing", 1, 1))
            .await
            .unwrap_err();
        assert_eq!(err, MenuError::EmptyKey);
    }
}
