//! Defines the structure mirroring the TOML configuration file format.

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) dns: DnsConfig,
    #[serde(default)]
    pub(crate) deliverability: DeliverabilityConfig,
    #[serde(default)]
    pub(crate) disposable: DisposableConfig,
    #[serde(default)]
    pub(crate) input: InputConfig,
    #[serde(default)]
    pub(crate) output: OutputConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DnsConfig {
    pub(crate) dns_timeout: Option<u64>,
    pub(crate) dns_servers: Option<Vec<String>>,
    pub(crate) attempts: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DeliverabilityConfig {
    pub(crate) check_dns: Option<bool>,
    pub(crate) strict_timeouts: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DisposableConfig {
    pub(crate) extra_domains: Option<Vec<String>>,
    pub(crate) domains_file: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct InputConfig {
    pub(crate) email_column: Option<String>,
    pub(crate) delimiter: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct OutputConfig {
    pub(crate) file_name: Option<String>,
    pub(crate) sheet_name: Option<String>,
}
