//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use regex::Regex;
use std::time::Duration;

/// Permissive address shape: local characters, `@`, host characters, a dot and
/// a 2 to 7 letter suffix, bounded by word boundaries rather than anchors.
pub const DEFAULT_EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b";

/// Header of the input column holding the addresses.
pub const DEFAULT_EMAIL_COLUMN: &str = "Email";

/// Default export file name for bulk runs.
pub const DEFAULT_OUTPUT_FILE: &str = "verified_emails.xlsx";

/// Runtime configuration settings used by the email-verdict core logic.
#[derive(Clone)]
pub struct Config {
    pub dns_timeout: Duration,
    pub dns_servers: Vec<String>,
    pub dns_attempts: usize,

    pub check_dns: bool,
    pub strict_timeouts: bool,

    pub email_regex: Regex,

    pub disposable_extra_domains: Vec<String>,
    pub disposable_domains_file: Option<String>,

    pub email_column: String,
    pub input_delimiter: u8,

    pub output_file_name: String,
    pub sheet_name: String,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        let email_regex = Regex::new(DEFAULT_EMAIL_PATTERN)
            .expect("Default email regex pattern failed to compile. This is a bug.");

        Config {
            dns_timeout: Duration::from_secs(5),
            dns_servers: Vec::new(),
            dns_attempts: 2,
            check_dns: true,
            strict_timeouts: false,
            email_regex,
            disposable_extra_domains: Vec::new(),
            disposable_domains_file: None,
            email_column: DEFAULT_EMAIL_COLUMN.to_string(),
            input_delimiter: b',',
            output_file_name: DEFAULT_OUTPUT_FILE.to_string(),
            sheet_name: "Sheet1".to_string(),
            loaded_config_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("dns_timeout", &self.dns_timeout)
            .field("dns_servers", &self.dns_servers)
            .field("dns_attempts", &self.dns_attempts)
            .field("check_dns", &self.check_dns)
            .field("strict_timeouts", &self.strict_timeouts)
            .field("email_regex", &self.email_regex.as_str())
            .field(
                "disposable_extra_domains_count",
                &self.disposable_extra_domains.len(),
            )
            .field("disposable_domains_file", &self.disposable_domains_file)
            .field("email_column", &self.email_column)
            .field("input_delimiter", &(self.input_delimiter as char))
            .field("output_file_name", &self.output_file_name)
            .field("sheet_name", &self.sheet_name)
            .field("loaded_config_path", &self.loaded_config_path)
            .finish()
    }
}
