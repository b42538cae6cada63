use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::catalog::PlanCatalog;

#[derive(Debug, Clone)]
pub struct BuildLimitsConfig {
    pub plans_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for BuildLimitsConfig {
    fn default() -> Self {
        Self {
            plans_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl BuildLimitsConfig {
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();

        if let Ok(path) = env::var("BUILD_PLANS_FILE") {
            if !path.trim().is_empty() {
                cfg.plans_file = Some(PathBuf::from(path));
            }
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            cfg.log_level = level;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.plans_file {
            if !path.exists() {
                anyhow::bail!("BUILD_PLANS_FILE {} does not exist", path.display());
            }
            if !path.is_file() {
                anyhow::bail!("BUILD_PLANS_FILE {} is not a regular file", path.display());
            }
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL cannot be empty");
        }

        Ok(())
    }

    /// Compiled presets, with any tiers from the configured plans file
    /// layered on top.
    pub fn load_catalog(&self) -> Result<PlanCatalog> {
        let Some(path) = &self.plans_file else {
            debug!("no plans file configured, using compiled presets");
            return Ok(PlanCatalog::default());
        };

        let source = fs::read_to_string(path)
            .with_context(|| format!("unable to read plans file {}", path.display()))?;
        let catalog = PlanCatalog::from_json(&source)
            .with_context(|| format!("invalid plan catalog in {}", path.display()))?;

        for (plan, limit) in catalog.iter() {
            if limit != plan.limit() {
                info!(plan = %plan, limit = %limit, "overriding plan preset");
            }
        }

        Ok(catalog)
    }
}
