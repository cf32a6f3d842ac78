//! # Table Actor
//!
//! A small actor runtime for keyed tables of rows. Each table is a Tokio task
//! that owns its rows outright and answers requests from cloneable clients
//! over an mpsc channel, one at a time.
//!
//! The request set mirrors what a hosted row store offers its callers:
//! create, fetch by id, list, partial patch by id, delete, plus row-specific
//! actions. Partial patches report how many rows they touched, so a caller
//! can tell "updated" apart from "blocked by policy or missing" without an
//! error path.
//!
//! ## Layers
//!
//! 1. **Row** ([`Row`]) - the record type and its hooks.
//! 2. **Runtime** ([`TableActor`]) - the request loop.
//! 3. **Interface** ([`TableClient`], [`TableHandle`]) - typed async calls.
//!
//! ## Context Injection
//!
//! A table's dependencies (for instance a write policy shared with the code
//! that configures it) are passed to [`TableActor::run`], not to `new`, so
//! every table can be created before any of them starts.
//!
//! ## Write Policy
//!
//! [`Row::permits_update`] is consulted before a patch is applied. A refusal
//! is not an error: the update returns [`Patched`] with zero rows affected.
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`mock::MockClient`] and
//! low-level `expect_*` helpers for driving a client without an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod row;

pub use actor::TableActor;
pub use client::TableClient;
pub use client_trait::TableHandle;
pub use error::TableError;
pub use message::{Patched, Response, TableRequest};
pub use row::Row;
