//! Who, if anyone, is signed in on this dashboard.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub String);

impl StaffId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The authenticated actor, or `None` when the session has lapsed.
    async fn current_actor(&self) -> Option<StaffId>;
}

/// In-process session shared by the dashboards of one runtime.
#[derive(Clone, Default)]
pub struct SessionHandle {
    actor: Arc<RwLock<Option<StaffId>>>,
}

impl SessionHandle {
    pub fn signed_in(actor: StaffId) -> Self {
        Self {
            actor: Arc::new(RwLock::new(Some(actor))),
        }
    }

    pub async fn sign_in(&self, actor: StaffId) {
        info!(%actor, "Signed in");
        *self.actor.write().await = Some(actor);
    }

    pub async fn sign_out(&self) {
        if let Some(actor) = self.actor.write().await.take() {
            info!(%actor, "Signed out");
        }
    }
}

#[async_trait]
impl SessionProvider for SessionHandle {
    async fn current_actor(&self) -> Option<StaffId> {
        self.actor.read().await.clone()
    }
}
