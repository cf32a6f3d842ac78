//! # Table Messages
//!
//! Requests sent from a [`TableClient`](crate::TableClient) to its
//! [`TableActor`](crate::TableActor). Every request carries a oneshot sender
//! for its reply.

use crate::error::TableError;
use crate::row::Row;
use tokio::sync::oneshot;

/// One-shot reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, TableError>>;

/// Outcome of a partial update.
///
/// `rows_affected == 0` means the patch was not applied, either because the
/// row does not exist or because its write policy refused it. `row` holds the
/// post-patch state when the patch landed.
#[derive(Debug, Clone, PartialEq)]
pub struct Patched<T> {
    pub rows_affected: u64,
    pub row: Option<T>,
}

impl<T> Patched<T> {
    pub fn applied(row: T) -> Self {
        Self {
            rows_affected: 1,
            row: Some(row),
        }
    }

    pub fn untouched() -> Self {
        Self {
            rows_affected: 0,
            row: None,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.rows_affected > 0
    }
}

/// Create/read/patch/delete plus row actions and a full listing.
#[derive(Debug)]
pub enum TableRequest<T: Row> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Every row, ordered by key.
    List { respond_to: Response<Vec<T>> },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Patched<T>>,
    },
    Delete { id: T::Id, respond_to: Response<()> },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
