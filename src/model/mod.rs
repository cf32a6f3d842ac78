//! Plain data: orders, menu items, customers and dashboard counters.
//!
//! The row types here implement [`Row`](table_actor::Row) in their actor
//! modules so the in-process store can serve them.

pub mod customer;
pub mod menu;
pub mod order;
pub mod stats;

pub use customer::*;
pub use menu::*;
pub use order::*;
pub use stats::*;
