use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw value standing for "no cap" in the untyped form of a quota.
pub const UNLIMITED_SENTINEL: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: i64 },
    #[error("{field} must be -1 (unlimited) or non-negative, got {value}")]
    InvalidQuota { field: &'static str, value: i64 },
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// A countable quota that may be uncapped.
///
/// Serialized as a plain integer where `-1` means [`Quota::Unlimited`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Quota {
    Unlimited,
    Limited(u32),
}

impl Quota {
    pub fn from_raw(field: &'static str, value: i64) -> Result<Self, LimitError> {
        match value {
            UNLIMITED_SENTINEL => Ok(Quota::Unlimited),
            v if v < 0 => Err(LimitError::InvalidQuota { field, value }),
            v => u32::try_from(v)
                .map(Quota::Limited)
                .map_err(|_| LimitError::OutOfRange { field, value }),
        }
    }

    pub fn as_raw(self) -> i64 {
        match self {
            Quota::Unlimited => UNLIMITED_SENTINEL,
            Quota::Limited(n) => i64::from(n),
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Quota::Unlimited)
    }
}

impl TryFrom<i64> for Quota {
    type Error = LimitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quota::from_raw("quota", value)
    }
}

impl From<Quota> for i64 {
    fn from(quota: Quota) -> Self {
        quota.as_raw()
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quota::Unlimited => f.write_str("unlimited"),
            Quota::Limited(n) => write!(f, "{n}"),
        }
    }
}

/// Build quotas applied to anything that submits builds.
///
/// A `Limit` is a plain value: holders rebind to a different `Limit`
/// instead of editing one in place, and every read hands out a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLimit", into = "RawLimit")]
pub struct Limit {
    concurrent_builds: u32,
    max_build_time: u32,
    builds_per_month: Quota,
    max_team_members: Quota,
}

impl Limit {
    pub const fn new(
        concurrent_builds: u32,
        max_build_time: u32,
        builds_per_month: Quota,
        max_team_members: Quota,
    ) -> Self {
        Self {
            concurrent_builds,
            max_build_time,
            builds_per_month,
            max_team_members,
        }
    }

    /// Builds a `Limit` from untyped numbers, as found in stored or
    /// admin-supplied data. `-1` marks an unlimited monthly build or seat
    /// quota; any other negative value is rejected.
    pub fn from_raw(
        concurrent_builds: i64,
        max_build_time: i64,
        builds_per_month: i64,
        max_team_members: i64,
    ) -> Result<Self, LimitError> {
        Ok(Self {
            concurrent_builds: non_negative("concurrent_builds", concurrent_builds)?,
            max_build_time: non_negative("max_build_time", max_build_time)?,
            builds_per_month: Quota::from_raw("builds_per_month", builds_per_month)?,
            max_team_members: Quota::from_raw("max_team_members", max_team_members)?,
        })
    }

    pub fn concurrent_builds(&self) -> u32 {
        self.concurrent_builds
    }

    /// Wall-clock cap of a single build, in minutes.
    pub fn max_build_time(&self) -> u32 {
        self.max_build_time
    }

    pub fn builds_per_month(&self) -> Quota {
        self.builds_per_month
    }

    pub fn max_team_members(&self) -> Quota {
        self.max_team_members
    }

    pub fn with_concurrent_builds(self, concurrent_builds: u32) -> Self {
        Self {
            concurrent_builds,
            ..self
        }
    }

    pub fn with_max_build_time(self, max_build_time: u32) -> Self {
        Self {
            max_build_time,
            ..self
        }
    }

    pub fn with_builds_per_month(self, builds_per_month: Quota) -> Self {
        Self {
            builds_per_month,
            ..self
        }
    }

    pub fn with_max_team_members(self, max_team_members: Quota) -> Self {
        Self {
            max_team_members,
            ..self
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} concurrent builds, {} min per build, {} builds/month, {} team members",
            self.concurrent_builds, self.max_build_time, self.builds_per_month, self.max_team_members
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawLimit {
    concurrent_builds: i64,
    max_build_time: i64,
    builds_per_month: i64,
    max_team_members: i64,
}

impl TryFrom<RawLimit> for Limit {
    type Error = LimitError;

    fn try_from(raw: RawLimit) -> Result<Self, Self::Error> {
        Limit::from_raw(
            raw.concurrent_builds,
            raw.max_build_time,
            raw.builds_per_month,
            raw.max_team_members,
        )
    }
}

impl From<Limit> for RawLimit {
    fn from(limit: Limit) -> Self {
        Self {
            concurrent_builds: i64::from(limit.concurrent_builds),
            max_build_time: i64::from(limit.max_build_time),
            builds_per_month: limit.builds_per_month.as_raw(),
            max_team_members: limit.max_team_members.as_raw(),
        }
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u32, LimitError> {
    if value < 0 {
        return Err(LimitError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| LimitError::OutOfRange { field, value })
}
