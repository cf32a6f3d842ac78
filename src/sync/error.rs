//! Error types for the synchronization layer.

use crate::error::TransitionError;
use crate::model::OrderId;
use thiserror::Error;

/// Failures reported by a [`FulfillmentStore`](super::FulfillmentStore).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The store could not be reached or dropped the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the payload itself.
    #[error("Store rejected request: {0}")]
    Rejected(String),
}

/// Errors returned by [`SyncEngine::apply_command`](super::SyncEngine::apply_command).
///
/// Everything except [`SyncError::InvalidTransition`] came from the remote
/// side and is answered with a refresh rather than an undo.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyncError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] TransitionError),

    #[error("No authenticated session")]
    Unauthenticated,

    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Write to {0} was blocked by the store")]
    PermissionDenied(OrderId),

    #[error("Store failure: {0}")]
    TransientIo(String),
}

impl SyncError {
    pub fn triggers_refresh(&self) -> bool {
        !matches!(self, SyncError::InvalidTransition(_))
    }
}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        SyncError::TransientIo(e.to_string())
    }
}
