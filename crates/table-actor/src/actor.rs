//! # Table Actor
//!
//! The server half of a table: it owns the rows and the receiving end of the
//! request channel, and handles one request at a time. Because nothing else
//! touches the rows, no lock guards them.

use crate::client::TableClient;
use crate::error::TableError;
use crate::message::{Patched, TableRequest};
use crate::row::Row;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Generic actor serving a keyed table of `T` rows.
///
/// ```rust
/// use table_actor::{Row, TableActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Dish { id: u32, stock: u32 }
/// #[derive(Debug)] struct DishCreate { stock: u32 }
/// #[derive(Debug)] struct DishPatch { stock: Option<u32> }
/// #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
///
/// #[async_trait]
/// impl Row for Dish {
///     type Id = u32; type Create = DishCreate; type Update = DishPatch;
///     type Action = (); type ActionResult = (); type Context = (); type Error = DishError;
///     fn from_create_params(id: u32, p: DishCreate) -> Result<Self, DishError> {
///         Ok(Self { id, stock: p.stock })
///     }
///     async fn on_update(&mut self, p: DishPatch, _: &()) -> Result<(), DishError> {
///         if let Some(stock) = p.stock { self.stock = stock; }
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), DishError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = TableActor::<Dish>::new(8);
///     tokio::spawn(actor.run(()));
///     let id = client.create(DishCreate { stock: 4 }).await.unwrap();
///     let patched = client.update(id, DishPatch { stock: Some(3) }).await.unwrap();
///     assert_eq!(patched.rows_affected, 1);
/// }
/// ```
pub struct TableActor<T: Row> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    rows: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Row> TableActor<T> {
    /// Creates the actor and a client bound to it. `buffer_size` is the
    /// request channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: BTreeMap::new(),
            next_id: 1,
        };
        (actor, TableClient::new(sender))
    }

    /// Serves requests until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut row = match T::from_create_params(id.clone(), params) {
                        Ok(row) => row,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(TableError::RowError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = row.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(TableError::RowError(Box::new(e))));
                        continue;
                    }
                    self.rows.insert(id.clone(), row);
                    info!(entity_type, %id, size = self.rows.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).cloned();
                    debug!(entity_type, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::List { respond_to } => {
                    debug!(entity_type, size = self.rows.len(), "List");
                    let _ = respond_to.send(Ok(self.rows.values().cloned().collect()));
                }
                TableRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(row) = self.rows.get_mut(&id) else {
                        warn!(entity_type, %id, "Update matched no row");
                        let _ = respond_to.send(Ok(Patched::untouched()));
                        continue;
                    };
                    if !row.permits_update(&update, &context) {
                        warn!(entity_type, %id, "Update blocked by write policy");
                        let _ = respond_to.send(Ok(Patched::untouched()));
                        continue;
                    }
                    // Patch a copy so a failing hook leaves the stored row intact.
                    let mut patched = row.clone();
                    if let Err(e) = patched.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(TableError::RowError(Box::new(e))));
                        continue;
                    }
                    *row = patched.clone();
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(Patched::applied(patched)));
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(row) = self.rows.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(TableError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = row.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(TableError::RowError(Box::new(e))));
                        continue;
                    }
                    self.rows.remove(&id);
                    info!(entity_type, %id, size = self.rows.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                TableRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(row) = self.rows.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(TableError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = row
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| TableError::RowError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.rows.len(), "Table shut down");
    }
}
