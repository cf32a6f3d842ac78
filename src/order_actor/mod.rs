//! The order table: every order ever placed, including completed history.

pub mod entity;
pub mod error;

pub use entity::WritePolicy;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use table_actor::TableActor;

/// Creates the order table actor and its client.
pub fn new(buffer: usize) -> (TableActor<Order>, OrderClient) {
    let (actor, inner) = TableActor::new(buffer);
    (actor, OrderClient::new(inner))
}
