use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::app::{PrivateApp, PublicApp};
use crate::limit::Limit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the build system, subscribed to a plan.
///
/// Users are created and dropped by account management. Applications keep
/// an `Arc` back to their owner but the user never tracks its applications.
#[derive(Debug)]
pub struct User {
    id: UserId,
    plan: RwLock<Limit>,
}

impl User {
    pub fn new(plan: Limit) -> Arc<Self> {
        Arc::new(Self {
            id: UserId::new(),
            plan: RwLock::new(plan),
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// Current plan of the user.
    pub fn plan(&self) -> Limit {
        // The guarded value is replaced whole, so a poisoned lock still holds
        // a complete `Limit`.
        *self.plan.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebinds the user to another plan. Private apps see the new plan on
    /// their next read; public apps that already opted out keep the plan
    /// they bound.
    pub fn change_plan(&self, plan: Limit) {
        let mut guard = self.plan.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, plan);
        drop(guard);

        info!(
            user_id = %self.id,
            previous = %previous,
            current = %plan,
            "changed user plan"
        );
    }

    pub fn upload_private_app(self: &Arc<Self>) -> PrivateApp {
        PrivateApp::new(Arc::clone(self))
    }

    /// Creates a public app bound to the shared public-app default limit.
    pub fn upload_public_app(self: &Arc<Self>) -> PublicApp {
        PublicApp::new(Arc::clone(self))
    }
}
