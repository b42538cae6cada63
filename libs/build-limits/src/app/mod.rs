use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::limit::Limit;
use crate::user::User;

mod private;
mod public;

pub use private::PrivateApp;
pub use public::{LimitSource, PublicApp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(Uuid);

impl AppId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AppId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("app {app_id} is private and always uses its owner's plan")]
    OptOutUnsupported { app_id: AppId },
}

/// Anything that submits builds and has an effective build limit.
pub trait Application: Send + Sync {
    fn id(&self) -> AppId;

    fn owner(&self) -> &Arc<User>;

    fn visibility(&self) -> Visibility;

    /// Effective limit at call time. Always a copy; nothing is cached.
    fn limit(&self) -> Limit;
}

/// Either kind of application, for callers that hold apps of mixed
/// visibility.
#[derive(Debug)]
pub enum App {
    Private(PrivateApp),
    Public(PublicApp),
}

impl App {
    pub fn as_public(&self) -> Option<&PublicApp> {
        match self {
            App::Public(app) => Some(app),
            App::Private(_) => None,
        }
    }

    /// Switches a public app to its owner's plan. Private apps already use
    /// it and are rejected.
    pub fn opt_out_from_default_limits(&self) -> Result<(), AppError> {
        match self {
            App::Public(app) => {
                app.opt_out_from_default_limits();
                Ok(())
            }
            App::Private(app) => Err(AppError::OptOutUnsupported { app_id: app.id() }),
        }
    }

    fn inner(&self) -> &dyn Application {
        match self {
            App::Private(app) => app,
            App::Public(app) => app,
        }
    }
}

impl Application for App {
    fn id(&self) -> AppId {
        self.inner().id()
    }

    fn owner(&self) -> &Arc<User> {
        self.inner().owner()
    }

    fn visibility(&self) -> Visibility {
        self.inner().visibility()
    }

    fn limit(&self) -> Limit {
        self.inner().limit()
    }
}

impl From<PrivateApp> for App {
    fn from(app: PrivateApp) -> Self {
        App::Private(app)
    }
}

impl From<PublicApp> for App {
    fn from(app: PublicApp) -> Self {
        App::Public(app)
    }
}
