use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::limit::{Limit, Quota};

// These presets are compiled in. Deployments that need different tiers
// supply a catalog file, see `BuildLimitsConfig::load_catalog`.

/// Free tier with tight quotas.
pub const FREE_PLAN: Limit = Limit::new(1, 10, Quota::Limited(200), Quota::Limited(2));

pub const DEVELOPER_PLAN: Limit = Limit::new(2, 45, Quota::Unlimited, Quota::Unlimited);

/// Top tier.
pub const ORGANIZATION_PLAN: Limit = Limit::new(4, 90, Quota::Unlimited, Quota::Unlimited);

/// Default limit of public (open source) applications, independent of the
/// owner's subscription.
pub const PUBLIC_APP_PLAN: Limit = Limit::new(2, 45, Quota::Unlimited, Quota::Unlimited);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown plan '{0}'")]
    UnknownPlan(String),
}

/// Subscription tier a user can be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Free,
    Developer,
    Organization,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Developer, Plan::Organization];

    /// Compiled preset for this tier.
    pub fn limit(self) -> Limit {
        match self {
            Plan::Free => FREE_PLAN,
            Plan::Developer => DEVELOPER_PLAN,
            Plan::Organization => ORGANIZATION_PLAN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Developer => "developer",
            Plan::Organization => "organization",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "developer" => Ok(Plan::Developer),
            "organization" => Ok(Plan::Organization),
            _ => Err(CatalogError::UnknownPlan(s.to_string())),
        }
    }
}

/// Tier table handed out to account management when creating users.
///
/// Tiers missing from a serialized catalog fall back to their compiled
/// preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanCatalog {
    free: Limit,
    developer: Limit,
    organization: Limit,
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self {
            free: FREE_PLAN,
            developer: DEVELOPER_PLAN,
            organization: ORGANIZATION_PLAN,
        }
    }
}

impl PlanCatalog {
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn limit(&self, plan: Plan) -> Limit {
        match plan {
            Plan::Free => self.free,
            Plan::Developer => self.developer,
            Plan::Organization => self.organization,
        }
    }

    /// Returns a catalog with `plan` bound to `limit`; `self` is unchanged.
    pub fn with_plan(self, plan: Plan, limit: Limit) -> Self {
        match plan {
            Plan::Free => Self { free: limit, ..self },
            Plan::Developer => Self {
                developer: limit,
                ..self
            },
            Plan::Organization => Self {
                organization: limit,
                ..self
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Plan, Limit)> + '_ {
        Plan::ALL.into_iter().map(move |plan| (plan, self.limit(plan)))
    }
}
