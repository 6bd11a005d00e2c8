//! Configuration for link generation.
//!
//! Settings come from two TOML files with the same schema:
//!
//! 1. **Global** (`<config dir>/javadoc-links/config.toml`, or the path in
//!    `JAVADOC_LINKS_CONFIG_PATH`): user-wide defaults, e.g. a company mirror
//!    as the default provider.
//! 2. **Project** (`javadoc-links.toml` in the working directory, or
//!    `--config <path>`): per-project rules.
//!
//! Project values win key by key. Lists are replaced, never concatenated.
//! Every key is optional:
//!
//! ```toml
//! default-javadoc-provider = "https://javadoc.io/doc/{group}/{name}/{version}"
//! check-javadoc-availability = true
//! excludes = ["com.example.internal:"]
//! builtin-overrides = true
//!
//! [filter]
//! kind = "no-snapshots"
//! except-for = ["org.incendo:"]
//!
//! [[overrides]]
//! filter = { kind = "starts-with-any-of", prefixes = ["com.google.guava:"] }
//! link = { kind = "simple", template = "https://guava.dev/releases/{version}/api/docs/" }
//!
//! [overrides-by-key]
//! "org.checkerframework:checker-qual" = "https://checkerframework.org/api/"
//!
//! [probe]
//! max-attempts = 3
//! retry-delay-secs = 15
//! timeout-secs = 30
//! priming-prefix = "https://javadoc.io/doc/"
//! priming-replacement = "https://javadoc.io/static/"
//! ```
//!
//! `check-javadoc-availability` can additionally be forced through the
//! `JAVADOC_LINKS_CHECK_AVAILABILITY` environment variable (`true`/`false`),
//! and turned off with `--no-check`.

use crate::constants::{
    CHECK_AVAILABILITY_ENV, DEFAULT_JAVADOC_PROVIDER, GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_ENV,
    PROJECT_CONFIG_FILE,
};
use crate::core::LinksError;
use crate::filter::DependencyFilter;
use crate::links::LinkSettings;
use crate::probe::{Priming, ProbePolicy};
use crate::rules::{OverrideRule, RuleSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// `[probe]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priming_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priming_replacement: Option<String>,
}

impl ProbeConfig {
    fn merge(self, over: Self) -> Self {
        Self {
            max_attempts: over.max_attempts.or(self.max_attempts),
            retry_delay_secs: over.retry_delay_secs.or(self.retry_delay_secs),
            timeout_secs: over.timeout_secs.or(self.timeout_secs),
            priming_prefix: over.priming_prefix.or(self.priming_prefix),
            priming_replacement: over.priming_replacement.or(self.priming_replacement),
        }
    }

    /// Probe policy with unset keys taken from the defaults.
    pub fn policy(&self) -> Result<ProbePolicy, LinksError> {
        let defaults = ProbePolicy::default();
        let max_attempts = self.max_attempts.unwrap_or(defaults.max_attempts);
        if max_attempts == 0 {
            return Err(LinksError::ConfigError {
                message: "probe.max-attempts must be at least 1".to_string(),
            });
        }

        let default_priming = defaults.priming.unwrap_or(Priming {
            prefix: String::new(),
            replacement: String::new(),
        });
        let prefix = self.priming_prefix.clone().unwrap_or(default_priming.prefix);
        let priming = if prefix.is_empty() {
            None
        } else {
            Some(Priming {
                prefix,
                replacement: self
                    .priming_replacement
                    .clone()
                    .unwrap_or(default_priming.replacement),
            })
        };

        Ok(ProbePolicy {
            max_attempts,
            retry_delay: self.retry_delay_secs.map_or(defaults.retry_delay, Duration::from_secs),
            timeout: self.timeout_secs.map_or(defaults.timeout, Duration::from_secs),
            priming,
        })
    }
}

/// One configuration file; see the module docs for the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LinksConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_javadoc_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_javadoc_availability: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excludes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<DependencyFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin_overrides: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<OverrideRule>>,
    /// Dependency key to template; a `BTreeMap` so registration order is by key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides_by_key: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl LinksConfig {
    /// Loads the global file (if present) and merges the project file over it.
    ///
    /// `explicit` must exist when given; otherwise `javadoc-links.toml` in
    /// `project_dir` is used if present.
    pub async fn load(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let global = match Self::global_path() {
            Some(path) if path.exists() => Self::load_from(&path).await?,
            _ => Self::default(),
        };

        let project = match explicit {
            Some(path) => Self::load_from(path).await?,
            None => {
                let path = project_dir.join(PROJECT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(&path).await?
                } else {
                    Self::default()
                }
            }
        };

        Ok(global.merge(project))
    }

    /// Reads and parses one configuration file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        toml::from_str(&content)
            .map_err(LinksError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Location of the global configuration file.
    ///
    /// `JAVADOC_LINKS_CONFIG_PATH` wins over the platform config directory.
    pub fn global_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(GLOBAL_CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join("config.toml"))
    }

    /// `over` wins for every key it sets.
    #[must_use]
    pub fn merge(self, over: Self) -> Self {
        Self {
            default_javadoc_provider: over.default_javadoc_provider.or(self.default_javadoc_provider),
            check_javadoc_availability: over
                .check_javadoc_availability
                .or(self.check_javadoc_availability),
            excludes: over.excludes.or(self.excludes),
            filter: over.filter.or(self.filter),
            builtin_overrides: over.builtin_overrides.or(self.builtin_overrides),
            overrides: over.overrides.or(self.overrides),
            overrides_by_key: over.overrides_by_key.or(self.overrides_by_key),
            probe: self.probe.merge(over.probe),
        }
    }

    /// Ordered rules: built-ins, then `overrides`, then `overrides-by-key`.
    pub fn rules(&self) -> RuleSet {
        let mut rules = if self.builtin_overrides.unwrap_or(true) {
            RuleSet::with_defaults()
        } else {
            RuleSet::new()
        };
        if let Some(overrides) = &self.overrides {
            rules.extend(overrides.iter().cloned());
        }
        if let Some(by_key) = &self.overrides_by_key {
            for (key, template) in by_key {
                rules.override_dependency(key, template.clone());
            }
        }
        rules
    }

    /// Whether links are probed, after the environment override.
    pub fn check_availability(&self) -> Result<bool, LinksError> {
        match std::env::var(CHECK_AVAILABILITY_ENV) {
            Ok(value) => parse_bool(&value).ok_or_else(|| LinksError::ConfigError {
                message: format!("{CHECK_AVAILABILITY_ENV} must be 'true' or 'false', got '{value}'"),
            }),
            Err(_) => Ok(self.check_javadoc_availability.unwrap_or(true)),
        }
    }

    /// Link settings for this configuration.
    pub fn settings(&self) -> Result<LinkSettings, LinksError> {
        let default_template = self
            .default_javadoc_provider
            .clone()
            .unwrap_or_else(|| DEFAULT_JAVADOC_PROVIDER.to_string());
        if default_template.trim().is_empty() {
            return Err(LinksError::ConfigError {
                message: "default-javadoc-provider must not be empty".to_string(),
            });
        }

        Ok(LinkSettings {
            default_template,
            check_availability: self.check_availability()?,
            skip: self.excludes.clone().unwrap_or_default(),
            filter: self.filter.clone().unwrap_or_default(),
            rules: self.rules(),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
