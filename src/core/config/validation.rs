//! Sanity checks applied to a fully assembled [`Config`].

use super::Config;
use crate::core::error::{AppError, Result};
use std::net::IpAddr;

const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Rejects configurations that would fail later in a less obvious way.
pub(crate) fn validate_config(config: &Config) -> Result<()> {
    if config.dns_timeout.is_zero() {
        return Err(AppError::Config(
            "dns_timeout must be greater than zero".to_string(),
        ));
    }
    if config.dns_attempts == 0 {
        return Err(AppError::Config(
            "DNS attempts must be at least 1".to_string(),
        ));
    }
    for server in &config.dns_servers {
        server.parse::<IpAddr>().map_err(|e| {
            AppError::Config(format!("Invalid DNS server '{}': {}", server, e))
        })?;
    }

    if config.email_column.trim().is_empty() {
        return Err(AppError::Config(
            "email_column must not be empty".to_string(),
        ));
    }

    if config.output_file_name.trim().is_empty() {
        return Err(AppError::Config(
            "output file_name must not be empty".to_string(),
        ));
    }

    validate_sheet_name(&config.sheet_name)
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::Config("sheet_name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(AppError::Config(format!(
            "sheet_name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return Err(AppError::Config(format!(
            "sheet_name '{}' contains forbidden character '{}'",
            name, c
        )));
    }
    Ok(())
}
