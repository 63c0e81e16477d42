//! Builder that layers defaults, the configuration file and command-line
//! overrides into a validated [`Config`].

use super::loading::{apply_config_file, load_config_file};
use super::validation::validate_config;
use super::Config;
use crate::core::error::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Collects overrides before producing a [`Config`].
///
/// Values set here win over the configuration file, which wins over defaults.
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    skip_file: bool,
    check_dns: Option<bool>,
    dns_timeout: Option<Duration>,
    email_column: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads this file instead of searching the default locations.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Ignores configuration files entirely.
    pub fn without_config_file(mut self) -> Self {
        self.skip_file = true;
        self
    }

    pub fn check_dns(mut self, enabled: bool) -> Self {
        self.check_dns = Some(enabled);
        self
    }

    pub fn dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = Some(timeout);
        self
    }

    pub fn email_column(mut self, column: impl Into<String>) -> Self {
        self.email_column = Some(column.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_file {
            let (file, loaded_path) = load_config_file(self.config_path.as_deref())?;
            apply_config_file(&mut config, file)?;
            config.loaded_config_path = loaded_path;
        }

        if let Some(check_dns) = self.check_dns {
            config.check_dns = check_dns;
        }
        if let Some(timeout) = self.dns_timeout {
            config.dns_timeout = timeout;
        }
        if let Some(column) = self.email_column {
            config.email_column = column;
        }

        validate_config(&config)?;
        tracing::debug!(target: "config", "Effective configuration: {:?}", config);
        Ok(config)
    }
}
