//! # System Lifecycle
//!
//! Starting, wiring and stopping the runtime.
//!
//! Table actors are created first without dependencies, then started with
//! their context injected through `run(ctx)`. The order table gets the
//! [`WritePolicy`](crate::order_actor::WritePolicy) it consults before every
//! patch; the menu and customer tables need nothing.
//!
//! Dashboards are added afterwards with
//! [`FulfillmentSystem::connect_dashboard`]. Each one is a
//! [`SyncEngine`](crate::sync::SyncEngine) with its own live store, persisting
//! through a [`StoreGateway`](crate::clients::StoreGateway) and listening on
//! the shared bus.
//!
//! ## Graceful Shutdown
//!
//! 1. Abort the dashboard listeners.
//! 2. Drop the table clients, closing the request channels.
//! 3. Each table sees `recv()` return `None`, logs its final size and exits.
//! 4. Await every table task.
//!
//! Dashboards own gateway clones, so they have to be dropped before step 2
//! can close anything.

pub mod fulfillment_system;
pub mod tracing;

pub use fulfillment_system::*;
pub use self::tracing::setup_tracing;
