use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::PUBLIC_APP_PLAN;
use crate::limit::Limit;
use crate::user::User;

use super::{AppId, Application, Visibility};

/// Where a public app's effective limit currently comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitSource {
    /// The shared public-app preset. Only held right after upload.
    Default,
    /// A limit installed by an administrator.
    Custom,
    /// The owner's plan as it was when the app opted out of the default.
    Inherited,
}

#[derive(Debug, Clone, Copy)]
enum Binding {
    Default,
    Custom(Limit),
    Inherited(Limit),
}

impl Binding {
    fn source(self) -> LimitSource {
        match self {
            Binding::Default => LimitSource::Default,
            Binding::Custom(_) => LimitSource::Custom,
            Binding::Inherited(_) => LimitSource::Inherited,
        }
    }
}

/// An open source application.
///
/// It starts on [`PUBLIC_APP_PLAN`] regardless of the owner's plan. An
/// administrator may install a custom limit, and the owner may opt out to
/// build under their own plan. Opting out discards any custom limit and
/// binds the plan the owner holds at that moment; a later plan change only
/// reaches the app when it opts out again.
#[derive(Debug)]
pub struct PublicApp {
    id: AppId,
    owner: Arc<User>,
    binding: RwLock<Binding>,
}

impl PublicApp {
    pub(crate) fn new(owner: Arc<User>) -> Self {
        Self {
            id: AppId::new(),
            owner,
            binding: RwLock::new(Binding::Default),
        }
    }

    /// Installs `limit` as this app's limit.
    ///
    /// Only administrators may do this, not the owner. The check belongs to
    /// the caller; nothing is verified here.
    pub fn customize_limit(&self, limit: Limit) {
        let previous = self.rebind(Binding::Custom(limit));
        info!(
            app_id = %self.id,
            owner_id = %self.owner.id(),
            previous = ?previous.source(),
            limit = %limit,
            "customized public app limit"
        );
    }

    /// Binds the app to its owner's current plan. Repeating the call
    /// rebinds to whatever plan the owner holds then.
    pub fn opt_out_from_default_limits(&self) {
        let plan = self.owner.plan();
        let previous = self.rebind(Binding::Inherited(plan));
        info!(
            app_id = %self.id,
            owner_id = %self.owner.id(),
            previous = ?previous.source(),
            limit = %plan,
            "public app opted out from default limits"
        );
    }

    pub fn limit_source(&self) -> LimitSource {
        self.binding().source()
    }

    fn binding(&self) -> Binding {
        *self.binding.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn rebind(&self, binding: Binding) -> Binding {
        let mut guard = self.binding.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, binding)
    }
}

impl Application for PublicApp {
    fn id(&self) -> AppId {
        self.id
    }

    fn owner(&self) -> &Arc<User> {
        &self.owner
    }

    fn visibility(&self) -> Visibility {
        Visibility::Public
    }

    fn limit(&self) -> Limit {
        match self.binding() {
            Binding::Default => PUBLIC_APP_PLAN,
            Binding::Custom(limit) => limit,
            Binding::Inherited(limit) => limit,
        }
    }
}
