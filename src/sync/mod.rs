//! # Synchronization Layer
//!
//! Keeps each dashboard's working set consistent with the durable store and
//! with the other dashboards: optimistic local apply, remote write,
//! refresh on failure, and broadcast reconciliation.
//!
//! The collaborators it consumes are traits ([`FulfillmentStore`],
//! [`SessionProvider`], [`Broadcaster`]) so tests can swap them out.

pub mod bus;
pub mod command;
pub mod engine;
pub mod error;
pub mod live;
pub mod session;
pub mod store;

pub use bus::{BroadcastBus, Broadcaster, ClientId, Envelope, LowStockAlert, SyncEvent, Topic};
pub use command::{Command, CommandOutcome};
pub use engine::SyncEngine;
pub use error::{StoreError, SyncError};
pub use live::{LiveStore, ViewEvent};
pub use session::{SessionHandle, SessionProvider, StaffId};
pub use store::FulfillmentStore;
