use std::sync::Arc;

use crate::limit::Limit;
use crate::user::User;

use super::{AppId, Application, Visibility};

/// An application that always builds under its owner's current plan.
#[derive(Debug)]
pub struct PrivateApp {
    id: AppId,
    owner: Arc<User>,
}

impl PrivateApp {
    pub(crate) fn new(owner: Arc<User>) -> Self {
        Self {
            id: AppId::new(),
            owner,
        }
    }
}

impl Application for PrivateApp {
    fn id(&self) -> AppId {
        self.id
    }

    fn owner(&self) -> &Arc<User> {
        &self.owner
    }

    fn visibility(&self) -> Visibility {
        Visibility::Private
    }

    fn limit(&self) -> Limit {
        self.owner.plan()
    }
}
