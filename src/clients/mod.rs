//! Typed wrappers around [`TableClient`](table_actor::TableClient), and the
//! [`StoreGateway`] the sync layer persists through.

pub mod customer_client;
pub mod gateway;
pub mod menu_client;
pub mod order_client;

pub use customer_client::*;
pub use gateway::*;
pub use menu_client::*;
pub use order_client::*;
