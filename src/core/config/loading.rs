//! Locates, reads and merges the TOML configuration file into a [`Config`].

use super::file::ConfigFile;
use super::Config;
use crate::core::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the working directory when no path is given.
pub const LOCAL_CONFIG_FILE: &str = "email-verdict.toml";

/// Candidate locations checked, in order, when no explicit path is given.
pub(crate) fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Ok(home) = std::env::var("HOME") {
        locations.push(
            PathBuf::from(home)
                .join(".config")
                .join("email-verdict")
                .join("config.toml"),
        );
    }
    locations
}

/// Resolves which configuration file to read.
///
/// An explicit path must exist. Implicit locations are optional, and `None`
/// is returned when none of them is present.
pub(crate) fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(AppError::Config(format!(
            "Config file '{}' not found",
            path.display()
        )));
    }

    Ok(default_config_locations()
        .into_iter()
        .find(|candidate| candidate.is_file()))
}

/// Parses TOML text into a [`ConfigFile`].
pub(crate) fn parse_config_str(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Reads the configuration file, if any, returning it with its path.
pub(crate) fn load_config_file(explicit: Option<&Path>) -> Result<(ConfigFile, Option<String>)> {
    match find_config_file(explicit)? {
        Some(path) => {
            tracing::debug!(target: "config", "Loading configuration from {}", path.display());
            let content = fs::read_to_string(&path)?;
            let file = parse_config_str(&content).map_err(|e| {
                AppError::Config(format!("Failed to parse '{}': {}", path.display(), e))
            })?;
            Ok((file, Some(path.display().to_string())))
        }
        None => {
            tracing::debug!(target: "config", "No configuration file found, using defaults");
            Ok((ConfigFile::default(), None))
        }
    }
}

/// Overlays every value present in `file` onto `config`.
pub(crate) fn apply_config_file(config: &mut Config, file: ConfigFile) -> Result<()> {
    if let Some(secs) = file.dns.dns_timeout {
        config.dns_timeout = Duration::from_secs(secs);
    }
    if let Some(servers) = file.dns.dns_servers {
        config.dns_servers = servers;
    }
    if let Some(attempts) = file.dns.attempts {
        config.dns_attempts = attempts;
    }

    if let Some(check_dns) = file.deliverability.check_dns {
        config.check_dns = check_dns;
    }
    if let Some(strict) = file.deliverability.strict_timeouts {
        config.strict_timeouts = strict;
    }

    if let Some(domains) = file.disposable.extra_domains {
        config.disposable_extra_domains = domains;
    }
    if file.disposable.domains_file.is_some() {
        config.disposable_domains_file = file.disposable.domains_file;
    }

    if let Some(column) = file.input.email_column {
        config.email_column = column;
    }
    if let Some(delimiter) = file.input.delimiter {
        config.input_delimiter = parse_delimiter(&delimiter)?;
    }

    if let Some(name) = file.output.file_name {
        config.output_file_name = name;
    }
    if let Some(sheet) = file.output.sheet_name {
        config.sheet_name = sheet;
    }

    Ok(())
}

/// Accepts a single ASCII character, with `\t` spelled out for tabs.
pub(crate) fn parse_delimiter(value: &str) -> Result<u8> {
    if value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(AppError::Config(format!(
            "Input delimiter must be a single ASCII character, got '{}'",
            value
        ))),
    }
}
