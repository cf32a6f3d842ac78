//! # TableHandle Trait
//!
//! Shared plumbing for typed clients: implement `inner` and `map_error`, get
//! `get`, `list` and `delete` for free.

use crate::{Row, TableClient, TableError};
use async_trait::async_trait;

/// Trait for row-specific clients wrapping a [`TableClient`].
///
/// ```rust
/// use table_actor::{Row, TableClient, TableError, TableHandle};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Guest { id: u32 }
/// #[derive(Debug)] struct GuestCreate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct GuestError(String);
///
/// #[async_trait]
/// impl Row for Guest {
///     type Id = u32; type Create = GuestCreate; type Update = ();
///     type Action = (); type ActionResult = (); type Context = (); type Error = GuestError;
///     fn from_create_params(id: u32, _: GuestCreate) -> Result<Self, GuestError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), GuestError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), GuestError> { Ok(()) }
/// }
///
/// struct GuestClient { inner: TableClient<Guest> }
///
/// impl TableHandle<Guest> for GuestClient {
///     type Error = GuestError;
///     fn inner(&self) -> &TableClient<Guest> { &self.inner }
///     fn map_error(e: TableError) -> GuestError { GuestError(e.to_string()) }
/// }
///
/// async fn usage(client: GuestClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait TableHandle<T: Row>: Send + Sync {
    type Error: Send + Sync;

    fn inner(&self) -> &TableClient<T>;

    fn map_error(e: TableError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
