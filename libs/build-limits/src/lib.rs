//! Build quota plans for a continuous integration service.
//!
//! Users subscribe to a plan, a [`Limit`] bundling four build quotas.
//! Applications uploaded by a user resolve their effective limit on every
//! read:
//!
//! - a [`PrivateApp`] always uses its owner's current plan;
//! - a [`PublicApp`] starts on [`PUBLIC_APP_PLAN`], can be given a custom
//!   limit by an administrator, and can opt out to its owner's plan.
//!
//! This crate only answers "what is the limit right now". Enforcing it,
//! persisting users and apps, and authorizing admin calls are left to the
//! caller.
//!
//! ```
//! use build_limits::{Application, User, FREE_PLAN, ORGANIZATION_PLAN, PUBLIC_APP_PLAN};
//!
//! let user = User::new(FREE_PLAN);
//! let app = user.upload_public_app();
//! assert_eq!(app.limit(), PUBLIC_APP_PLAN);
//!
//! app.customize_limit(ORGANIZATION_PLAN);
//! assert_eq!(app.limit(), ORGANIZATION_PLAN);
//!
//! app.opt_out_from_default_limits();
//! assert_eq!(app.limit(), FREE_PLAN);
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod limit;
pub mod user;

pub use app::{App, AppError, AppId, Application, LimitSource, PrivateApp, PublicApp, Visibility};
pub use catalog::{
    CatalogError, Plan, PlanCatalog, DEVELOPER_PLAN, FREE_PLAN, ORGANIZATION_PLAN, PUBLIC_APP_PLAN,
};
pub use config::BuildLimitsConfig;
pub use limit::{Limit, LimitError, Quota, UNLIMITED_SENTINEL};
pub use user::{User, UserId};
