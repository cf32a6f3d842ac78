//! The menu table: stock levels and availability per dish.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::MenuClient;
use crate::model::MenuItem;
use table_actor::TableActor;

/// Creates the menu table actor and its client.
pub fn new(buffer: usize) -> (TableActor<MenuItem>, MenuClient) {
    let (actor, inner) = TableActor::new(buffer);
    (actor, MenuClient::new(inner))
}
