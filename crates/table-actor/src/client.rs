//! # Table Client
//!
//! The cloneable sending half of a table. Each call sends one request and
//! awaits the actor's reply on a oneshot channel.

use crate::error::TableError;
use crate::message::{Patched, TableRequest};
use crate::row::Row;
use tokio::sync::{mpsc, oneshot};

/// Async handle to a [`TableActor`](crate::TableActor). Cloning copies only
/// the channel sender.
pub struct TableClient<T: Row> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: Row> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Row> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, TableError>>) -> TableRequest<T>,
    ) -> Result<R, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| TableError::ActorClosed)?;
        response.await.map_err(|_| TableError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, TableError> {
        self.request(|respond_to| TableRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, TableError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, TableError> {
        self.request(|respond_to| TableRequest::List { respond_to })
            .await
    }

    /// Applies a partial patch. A missing or policy-blocked row is not an
    /// error: it comes back with `rows_affected == 0`.
    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<Patched<T>, TableError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), TableError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, TableError> {
        self.request(|respond_to| TableRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
