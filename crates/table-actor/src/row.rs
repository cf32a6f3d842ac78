//! # Row Trait
//!
//! The contract every stored record (orders, menu items, customers) implements
//! so that a single [`TableActor`](crate::TableActor) loop can serve it.
//!
//! Associated types pin each table to its own payloads: an order table only
//! accepts order patches, a menu table only menu patches. Hooks are async and
//! receive the table's `Context`, injected when the actor starts running.
//!
//! [`Row::permits_update`] is the write-policy hook. When it returns `false`
//! the update is not applied and the caller sees zero rows affected, which is
//! how a hosted store reports a write blocked by a row-level policy.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

#[async_trait]
pub trait Row: Clone + Send + Sync + 'static {
    /// Primary key. Generated from a per-table `u32` sequence on create.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to insert a new row.
    type Create: Send + Sync + Debug;

    /// Partial patch applied by `update`.
    type Update: Send + Sync + Debug;

    /// Row-specific operations beyond plain patching.
    type Action: Send + Sync + Debug;

    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected through [`TableActor::run`](crate::TableActor::run).
    /// Use `()` when the table needs none.
    type Context: Send + Sync;

    /// One error enum per table, not per operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the row from its freshly assigned key and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction and before the row becomes visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Write policy. Returning `false` blocks the patch without an error.
    fn permits_update(&self, _update: &Self::Update, _ctx: &Self::Context) -> bool {
        true
    }

    /// Applies a partial patch in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
