//! Configuration file support for sbom-audit.
//!
//! Provides YAML-based configuration through `sbom-audit.config.yml` files,
//! including data structures, file loading, and validation. Every field is
//! optional; command-line flags take precedence over file values.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::network::{Credentials, OssIndexClient};
use crate::application::use_cases::PollingOptions;
use crate::shared::error::AuditError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-audit.config.yml";

const DEFAULT_ECOSYSTEM: &str = "npm";
const DEFAULT_CACHE_TTL_HOURS: u64 = 12;
const DEFAULT_STAGE: &str = "develop";
const DEFAULT_MAX_POLLING_ATTEMPTS: u32 = 300;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct AuditConfig {
    pub ecosystem: Option<String>,
    pub spartan: Option<bool>,
    #[serde(default)]
    pub oss_index: OssIndexConfig,
    #[serde(default)]
    pub iq: IqConfig,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Vulnerability database connection and cache settings.
#[derive(Debug, Deserialize, Default)]
pub struct OssIndexConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_hours: Option<u64>,
}

/// Policy scan server settings.
#[derive(Debug, Deserialize, Default)]
pub struct IqConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub application: Option<String>,
    pub stage: Option<String>,
    pub max_polling_attempts: Option<u32>,
    pub poll_interval_ms: Option<u64>,
}

impl AuditConfig {
    pub fn ecosystem(&self) -> &str {
        self.ecosystem.as_deref().unwrap_or(DEFAULT_ECOSYSTEM)
    }

    pub fn spartan(&self) -> bool {
        self.spartan.unwrap_or(false)
    }
}

impl OssIndexConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(OssIndexClient::DEFAULT_BASE_URL)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.username.clone(), self.token.clone())
    }

    pub fn cache_ttl(&self) -> Duration {
        let hours = self.cache_ttl_hours.unwrap_or(DEFAULT_CACHE_TTL_HOURS);
        Duration::from_secs(hours.saturating_mul(3600))
    }
}

impl IqConfig {
    pub fn stage(&self) -> &str {
        self.stage.as_deref().unwrap_or(DEFAULT_STAGE)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.username.clone(), self.token.clone())
    }

    pub fn polling_options(&self) -> PollingOptions {
        PollingOptions {
            max_attempts: self
                .max_polling_attempts
                .unwrap_or(DEFAULT_MAX_POLLING_ATTEMPTS),
            interval: Duration::from_millis(
                self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<AuditConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AuditError::ConfigError {
        path: path.to_path_buf(),
        details: format!("cannot read file: {}", e),
    })?;

    let config: AuditConfig =
        serde_yaml_ng::from_str(&content).map_err(|e| AuditError::ConfigError {
            path: path.to_path_buf(),
            details: format!("cannot parse file: {}", e),
        })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<AuditConfig>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &AuditConfig) -> Result<()> {
    check_credential_pair("oss_index", &config.oss_index.username, &config.oss_index.token)?;
    check_credential_pair("iq", &config.iq.username, &config.iq.token)?;

    if config.oss_index.cache_ttl_hours == Some(0) {
        return Err(validation("oss_index.cache_ttl_hours must be greater than 0"));
    }
    if config.iq.max_polling_attempts == Some(0) {
        return Err(validation("iq.max_polling_attempts must be greater than 0"));
    }
    if config.iq.poll_interval_ms == Some(0) {
        return Err(validation("iq.poll_interval_ms must be greater than 0"));
    }
    if config.ecosystem.as_deref().is_some_and(|e| e.trim().is_empty()) {
        return Err(validation("ecosystem must not be empty"));
    }
    Ok(())
}

fn check_credential_pair(
    section: &str,
    username: &Option<String>,
    token: &Option<String>,
) -> Result<()> {
    if username.is_some() != token.is_some() {
        return Err(validation(&format!(
            "{section}.username and {section}.token must be set together"
        )));
    }
    Ok(())
}

fn validation(message: &str) -> anyhow::Error {
    AuditError::Validation {
        message: message.to_string(),
    }
    .into()
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &AuditConfig) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored", key);
    }
}
