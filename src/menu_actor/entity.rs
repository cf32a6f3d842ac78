use super::{MenuAction, MenuActionResult, MenuError};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemPatch};
use async_trait::async_trait;
use table_actor::Row;
use tracing::debug;

#[async_trait]
impl Row for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemPatch;
    type Action = MenuAction;
    type ActionResult = MenuActionResult;
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        let key = params.key.trim().to_string();
        if key.is_empty() {
            return Err(MenuError::EmptyKey);
        }
        Ok(MenuItem {
            id,
            key,
            name: params.name,
            stock: params.stock,
            min_stock_threshold: params.min_stock_threshold,
            status: params.status,
        })
    }

    async fn on_update(&mut self, patch: MenuItemPatch, _ctx: &()) -> Result<(), MenuError> {
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        debug!(key = %self.key, stock = self.stock, status = %self.status, "Menu item patched");
        Ok(())
    }

    async fn handle_action(&mut self, action: MenuAction, _ctx: &()) -> Result<MenuActionResult, MenuError> {
        match action {
            MenuAction::CheckStock => Ok(MenuActionResult::CheckStock {
                stock: self.stock,
                status: self.status,
            }),
            MenuAction::SetAvailability(status) => {
                self.status = status;
                Ok(MenuActionResult::SetAvailability(status))
            }
        }
    }
}
