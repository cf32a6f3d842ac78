//! # Mock Tables
//!
//! Test doubles that speak the [`TableRequest`] protocol without running a
//! [`TableActor`](crate::TableActor).
//!
//! Two styles are available:
//!
//! - [`MockClient`] answers requests from a queue of expectations, in order.
//!   Handy when the code under test makes a known sequence of calls.
//! - [`create_mock_client`] hands back the raw receiver so a test can pull
//!   each request with [`expect_get`], [`expect_update`], [`expect_list`] or
//!   [`expect_action`] and reply by hand (including not replying at all).
//!
//! ```rust
//! use table_actor::mock::MockClient;
//! use table_actor::{Patched, Row};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Ticket { id: u32, done: bool }
//! #[derive(Debug)] struct TicketCreate;
//! #[derive(Debug)] struct TicketPatch { done: bool }
//! #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
//!
//! #[async_trait]
//! impl Row for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = TicketPatch;
//!     type Action = (); type ActionResult = (); type Context = (); type Error = TicketError;
//!     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, TicketError> {
//!         Ok(Self { id, done: false })
//!     }
//!     async fn on_update(&mut self, p: TicketPatch, _: &()) -> Result<(), TicketError> {
//!         self.done = p.done;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TicketError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Ticket>::new();
//!     mock.expect_get(7).return_ok(Some(Ticket { id: 7, done: false }));
//!     mock.expect_update(7).return_ok(Patched::untouched());
//!
//!     let client = mock.client();
//!     assert!(client.get(7).await.unwrap().is_some());
//!     let patched = client.update(7, TicketPatch { done: true }).await.unwrap();
//!     assert_eq!(patched.rows_affected, 0);
//!     mock.verify();
//! }
//! ```

use crate::{Patched, Row, TableClient, TableError, TableRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: Row> {
    Create(Result<T::Id, TableError>),
    Get(Result<Option<T>, TableError>),
    List(Result<Vec<T>, TableError>),
    Update(Result<Patched<T>, TableError>),
    Action(Result<T::ActionResult, TableError>),
}

impl<T: Row> Expectation<T> {
    fn label(&self) -> &'static str {
        match self {
            Expectation::Create(_) => "create",
            Expectation::Get(_) => "get",
            Expectation::List(_) => "list",
            Expectation::Update(_) => "update",
            Expectation::Action(_) => "action",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client backed by a queue of scripted replies.
///
/// Requests are matched against expectations strictly in order; a request of
/// the wrong kind panics the background task, which surfaces in the test as
/// [`TableError::ActorDropped`].
pub struct MockClient<T: Row> {
    client: TableClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Row> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (TableRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::List { respond_to }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, expected) => {
                        panic!(
                            "unexpected {} request, expected {}",
                            request_label(&request),
                            expected.map(|e| e.label()).unwrap_or("nothing")
                        );
                    }
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Create)
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Get)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::List)
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, Patched<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Update)
    }

    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Action)
    }

    /// Panics if any scripted reply was never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: Row> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn request_label<T: Row>(request: &TableRequest<T>) -> &'static str {
    match request {
        TableRequest::Create { .. } => "create",
        TableRequest::Get { .. } => "get",
        TableRequest::List { .. } => "list",
        TableRequest::Update { .. } => "update",
        TableRequest::Delete { .. } => "delete",
        TableRequest::Action { .. } => "action",
    }
}

/// Queues one scripted reply of type `R`.
pub struct ExpectationBuilder<T: Row, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, TableError>) -> Expectation<T>,
}

impl<T: Row, R> ExpectationBuilder<T, R> {
    fn new(expectations: Queue<T>, wrap: fn(Result<R, TableError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: TableError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client<T: Row>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

type Reply<R> = oneshot::Sender<Result<R, TableError>>;

pub async fn expect_get<T: Row>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(TableRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: Row>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<Reply<Vec<T>>> {
    match receiver.recv().await {
        Some(TableRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_update<T: Row>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, T::Update, Reply<Patched<T>>)> {
    match receiver.recv().await {
        Some(TableRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Row>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, T::Action, Reply<T::ActionResult>)> {
    match receiver.recv().await {
        Some(TableRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u32,
        count: u32,
    }

    #[derive(Debug)]
    struct ShelfPatch(u32);

    #[derive(Debug, thiserror::Error)]
    #[error("shelf error")]
    struct ShelfError;

    #[async_trait]
    impl Row for Shelf {
        type Id = u32;
        type Create = u32;
        type Update = ShelfPatch;
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = ShelfError;

        fn from_create_params(id: u32, count: u32) -> Result<Self, ShelfError> {
            Ok(Self { id, count })
        }

        async fn on_update(&mut self, patch: ShelfPatch, _: &()) -> Result<(), ShelfError> {
            self.count = patch.0;
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), ShelfError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_manual_reply_to_update() {
        let (client, mut receiver) = create_mock_client::<Shelf>(4);

        let task = tokio::spawn(async move { client.update(3, ShelfPatch(9)).await });

        let (id, patch, reply) = expect_update(&mut receiver).await.expect("update request");
        assert_eq!(id, 3);
        assert_eq!(patch.0, 9);
        reply
            .send(Ok(Patched::applied(Shelf { id: 3, count: 9 })))
            .unwrap();

        let patched = task.await.unwrap().unwrap();
        assert!(patched.is_applied());
        assert_eq!(patched.row.unwrap().count, 9);
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_list()
            .return_ok(vec![Shelf { id: 1, count: 2 }, Shelf { id: 2, count: 0 }]);
        mock.expect_get(5).return_err(TableError::ActorClosed);

        let client = mock.client();
        assert_eq!(client.list().await.unwrap().len(), 2);
        assert!(matches!(
            client.get(5).await,
            Err(TableError::ActorClosed)
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_reply() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_list().return_ok(vec![]);

        let client = mock.client();
        let result = client.get(1).await;
        assert!(matches!(result, Err(TableError::ActorDropped)));
    }
}
