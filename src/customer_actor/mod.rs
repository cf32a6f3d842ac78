//! The customer table. Read-only as far as fulfillment is concerned; rows
//! are created by the ordering channel.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use table_actor::TableActor;

/// Creates the customer table actor and its client.
pub fn new(buffer: usize) -> (TableActor<Customer>, CustomerClient) {
    let (actor, inner) = TableActor::new(buffer);
    (actor, CustomerClient::new(inner))
}
