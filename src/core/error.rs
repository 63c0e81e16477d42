//! Defines the custom error types for the email-verdict application.

use std::{io, net::AddrParseError};
use thiserror::Error;

/// The primary error type for configuration, input and export failures.
///
/// Per-address problems are never reported through this type; they end up in
/// [`DeliverabilityFailure`] and from there in the verdict itself.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing the TOML configuration file.
    #[error("TOML Error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error reading or writing CSV data.
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    /// Error producing the spreadsheet export.
    #[error("Spreadsheet Error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Error parsing an IP address (e.g., a configured DNS server).
    #[error("Address Parsing Error: {0}")]
    AddrParse(#[from] AddrParseError),

    /// Error during DNS resolution.
    #[error("DNS Resolution Error: {0}")]
    Dns(#[from] trust_dns_resolver::error::ResolveError),

    /// Specific DNS error indicating the domain does not exist.
    #[error("Domain Not Found (NXDOMAIN): {0}")]
    NxDomain(String),

    /// Specific DNS error indicating no relevant records were found.
    #[error("No DNS Records Found (MX/A): {0}")]
    NoDnsRecords(String),

    /// DNS operation timed out.
    #[error("DNS Timeout for domain: {0}")]
    DnsTimeout(String),

    /// The nameserver answered with an error code (SERVFAIL, REFUSED, ...),
    /// so nothing is known about the domain's records.
    #[error("DNS server failure ({response_code}) for domain: {domain}")]
    DnsServerFailure {
        domain: String,
        response_code: trust_dns_resolver::proto::op::ResponseCode,
    },

    /// The uploaded table lacks the column holding the addresses.
    #[error("Input must contain '{column}' column (found: {})", .available.join(", "))]
    MissingColumn {
        /// The column that was required.
        column: String,
        /// The header names actually present.
        available: Vec<String>,
    },

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

/// Why the deliverability check rejected an address.
///
/// The `Display` output is the bare reason text, which is what lands in the
/// `Reason` column.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliverabilityFailure {
    /// The address is not shaped like something a mail server would accept.
    #[error("{0}")]
    Syntax(String),

    /// The address looks fine but its domain cannot receive mail.
    #[error("{0}")]
    Undeliverable(String),
}

impl DeliverabilityFailure {
    /// The reason text recorded on the verdict.
    pub fn reason(&self) -> &str {
        match self {
            DeliverabilityFailure::Syntax(reason) | DeliverabilityFailure::Undeliverable(reason) => {
                reason
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_lists_available_headers() {
        let err = AppError::MissingColumn {
            column: "Email".to_string(),
            available: vec!["Name".to_string(), "Phone".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Input must contain 'Email' column (found: Name, Phone)"
        );
    }

    #[test]
    fn failure_display_is_the_bare_reason() {
        let failure =
            DeliverabilityFailure::Undeliverable("The domain name x.invalid does not exist.".into());
        assert_eq!(failure.to_string(), failure.reason());
    }
}
