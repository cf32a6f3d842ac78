#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Order Fulfillment
//!
//! > **Live order fulfillment for a multi-dashboard restaurant kitchen.**
//!
//! Tracks an order from placement through the kitchen to handover, keeps the
//! order status in step with its items, deducts stock when an order is
//! completed, and keeps every connected dashboard (kitchen display, branch
//! manager) consistent through a write-through cache that re-syncs from the
//! store whenever something goes wrong.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Rules ([`kitchen`], [`order_machine`], [`ledger`])
//! Pure, synchronous state transitions.
//! - Items move `Pending → Cooking → Ready → Served`, one step at a time.
//! - The order status is recomputed after every item change and only ever
//!   moves forward.
//! - The [`InventoryLedger`](ledger::InventoryLedger) plans stock deductions
//!   without committing them.
//!
//! ### 2. Fulfillment ([`fulfillment`])
//! What happens when an order reaches `Completed`: per-item stock
//! deduction, low-stock alerts, menu broadcast and deferred removal from the
//! working set.
//!
//! ### 3. Synchronization ([`sync`])
//! - **Key items**: [`SyncEngine`](sync::SyncEngine),
//!   [`LiveStore`](sync::LiveStore), [`Command`](sync::Command).
//! - Optimistic apply, session and existence checks, partial patch,
//!   rows-affected verification, broadcast. Failures refresh instead of
//!   rolling back ("server wins").
//!
//! ### 4. The Store ([`order_actor`], [`menu_actor`], [`customer_actor`], [`clients`])
//! Each table is a [`TableActor`](table_actor::TableActor) serving one row
//! type. The [`StoreGateway`](clients::StoreGateway) is what the sync layer
//! persists through.
//!
//! ### 5. The Runtime ([`lifecycle`], [`config`])
//! [`FulfillmentSystem`](lifecycle::FulfillmentSystem) spawns the tables,
//! owns the bus and the session, connects dashboards and shuts everything
//! down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # A scripted shift with two dashboards
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod error;
pub mod fulfillment;
pub mod kitchen;
pub mod ledger;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod order_machine;
pub mod sync;
