//! DNS resolver construction and mail routing lookups.

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use std::net::IpAddr;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::TokioAsyncResolver;

/// How mail for a domain would be routed, as far as DNS can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailRoute {
    /// MX hosts, most preferred first.
    Exchangers(Vec<String>),
    /// No MX records, but the domain itself has an address (implicit MX).
    AddressOnly,
    /// A single MX pointing at the root, declaring that no mail is accepted.
    NullMx,
}

/// Creates a resolver from the configured servers, or from the system
/// configuration when none are configured.
pub fn create_resolver(config: &Config) -> Result<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = config.dns_timeout;
    opts.attempts = config.dns_attempts;

    let resolver_config = if config.dns_servers.is_empty() {
        match trust_dns_resolver::system_conf::read_system_conf() {
            Ok((system_config, _)) => {
                tracing::debug!(target: "dns", "Using system resolver configuration");
                system_config
            }
            Err(e) => {
                tracing::warn!(
                    target: "dns",
                    "Failed to read system resolver configuration ({}), falling back to public resolvers",
                    e
                );
                ResolverConfig::default()
            }
        }
    } else {
        let ips = config
            .dns_servers
            .iter()
            .map(|s| s.parse::<IpAddr>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(target: "dns", "Using configured DNS servers: {:?}", ips);
        ResolverConfig::from_parts(None, vec![], NameServerConfigGroup::from_ips_clear(&ips, 53, true))
    };

    Ok(TokioAsyncResolver::tokio(resolver_config, opts))
}

/// Maps resolver errors onto the crate's DNS error variants.
pub(crate) fn classify_resolve_error(err: ResolveError, domain: &str) -> AppError {
    if let ResolveErrorKind::NoRecordsFound { response_code, .. } = err.kind() {
        return classify_response_code(*response_code, domain);
    }
    if matches!(err.kind(), ResolveErrorKind::Timeout) {
        return AppError::DnsTimeout(domain.to_string());
    }
    AppError::Dns(err)
}

/// Interprets the response code of an answer that carried no records.
///
/// Only NOERROR means the name exists without the requested data; any other
/// error code is the server failing to answer.
fn classify_response_code(response_code: ResponseCode, domain: &str) -> AppError {
    match response_code {
        ResponseCode::NoError => AppError::NoDnsRecords(domain.to_string()),
        ResponseCode::NXDomain => AppError::NxDomain(domain.to_string()),
        code => AppError::DnsServerFailure {
            domain: domain.to_string(),
            response_code: code,
        },
    }
}

/// Looks up how mail for `domain` is delivered.
///
/// Falls back to an address lookup when the domain has no MX records. Errors
/// are classified into [`AppError::NxDomain`], [`AppError::NoDnsRecords`],
/// [`AppError::DnsTimeout`], [`AppError::DnsServerFailure`] or
/// [`AppError::Dns`].
pub async fn resolve_mail_route(resolver: &TokioAsyncResolver, domain: &str) -> Result<MailRoute> {
    let fqdn = format!("{}.", domain.trim_end_matches('.'));

    match resolver.mx_lookup(fqdn.as_str()).await {
        Ok(lookup) => {
            let mut records: Vec<_> = lookup.iter().collect();
            records.sort_by_key(|mx| mx.preference());

            if records.len() == 1 && records[0].exchange().is_root() {
                tracing::debug!(target: "dns", "{} publishes a null MX", domain);
                return Ok(MailRoute::NullMx);
            }

            let hosts: Vec<String> = records
                .iter()
                .filter(|mx| !mx.exchange().is_root())
                .map(|mx| mx.exchange().to_utf8().trim_end_matches('.').to_string())
                .collect();
            if hosts.is_empty() {
                return resolve_address_fallback(resolver, domain, &fqdn).await;
            }
            tracing::debug!(target: "dns", "MX for {}: {:?}", domain, hosts);
            Ok(MailRoute::Exchangers(hosts))
        }
        Err(e) => match classify_resolve_error(e, domain) {
            AppError::NoDnsRecords(_) => resolve_address_fallback(resolver, domain, &fqdn).await,
            other => Err(other),
        },
    }
}

async fn resolve_address_fallback(
    resolver: &TokioAsyncResolver,
    domain: &str,
    fqdn: &str,
) -> Result<MailRoute> {
    tracing::debug!(target: "dns", "No MX for {}, trying address records", domain);
    let lookup = resolver
        .lookup_ip(fqdn)
        .await
        .map_err(|e| classify_resolve_error(e, domain))?;

    if lookup.iter().next().is_some() {
        Ok(MailRoute::AddressOnly)
    } else {
        Err(AppError::NoDnsRecords(domain.to_string()))
    }
}
