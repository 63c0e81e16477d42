//! Deliverability checking: can this address plausibly receive mail?

use crate::core::config::Config;
use crate::core::error::{AppError, DeliverabilityFailure, Result};
use crate::utils::dns::{self, MailRoute};
use crate::validation::address::parse_address;
use std::future::Future;
use trust_dns_resolver::TokioAsyncResolver;

/// Outcome of a single deliverability check.
pub type DeliverabilityResult = std::result::Result<(), DeliverabilityFailure>;

/// A single-shot deliverability check for one address.
///
/// A failure is an ordinary outcome carrying its reason, not an error in the
/// surrounding control flow.
pub trait DeliverabilityCheck {
    fn check(&self, email: &str) -> impl Future<Output = DeliverabilityResult> + Send;
}

/// Validates address shape, then asks DNS whether the domain accepts mail.
#[derive(Clone)]
pub struct DnsDeliverabilityChecker {
    resolver: Option<TokioAsyncResolver>,
    strict_timeouts: bool,
}

impl DnsDeliverabilityChecker {
    /// Builds a checker honouring `check_dns`, `strict_timeouts` and the
    /// resolver settings in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = if config.check_dns {
            Some(dns::create_resolver(config)?)
        } else {
            tracing::info!(target: "deliverability", "DNS checks disabled, applying address rules only");
            None
        };
        Ok(Self {
            resolver,
            strict_timeouts: config.strict_timeouts,
        })
    }

    /// A checker that only applies the address shape rules.
    pub fn shape_only() -> Self {
        Self {
            resolver: None,
            strict_timeouts: false,
        }
    }

    pub fn uses_dns(&self) -> bool {
        self.resolver.is_some()
    }

    async fn check_domain(&self, resolver: &TokioAsyncResolver, domain: &str) -> DeliverabilityResult {
        let outcome = dns::resolve_mail_route(resolver, domain).await;
        route_verdict(outcome, domain, self.strict_timeouts)
    }
}

/// Turns a mail routing lookup into a deliverability outcome.
///
/// Timeouts and nameserver errors leave deliverability unknown; they only
/// count as failures when `strict_timeouts` is set.
pub(crate) fn route_verdict(
    outcome: Result<MailRoute>,
    domain: &str,
    strict_timeouts: bool,
) -> DeliverabilityResult {
    let reason = match outcome {
        Ok(MailRoute::Exchangers(_)) | Ok(MailRoute::AddressOnly) => return Ok(()),
        Ok(MailRoute::NullMx) | Err(AppError::NoDnsRecords(_)) => {
            format!("The domain name {} does not accept email.", domain)
        }
        Err(AppError::NxDomain(_)) => format!("The domain name {} does not exist.", domain),
        Err(AppError::DnsTimeout(_)) if !strict_timeouts => {
            tracing::warn!(
                target: "deliverability",
                "DNS lookup for {} timed out, deliverability unknown",
                domain
            );
            return Ok(());
        }
        Err(AppError::DnsTimeout(_)) => format!("The DNS query for {} timed out.", domain),
        Err(AppError::DnsServerFailure { response_code, .. }) if !strict_timeouts => {
            tracing::warn!(
                target: "deliverability",
                "DNS server answered {} for {}, deliverability unknown",
                response_code,
                domain
            );
            return Ok(());
        }
        Err(AppError::DnsServerFailure { response_code, .. }) => format!(
            "The DNS server could not answer for {} ({}).",
            domain, response_code
        ),
        Err(e) => format!("The domain name {} could not be checked: {}", domain, e),
    };
    Err(DeliverabilityFailure::Undeliverable(reason))
}

impl std::fmt::Debug for DnsDeliverabilityChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsDeliverabilityChecker")
            .field("uses_dns", &self.uses_dns())
            .field("strict_timeouts", &self.strict_timeouts)
            .finish()
    }
}

impl DeliverabilityCheck for DnsDeliverabilityChecker {
    async fn check(&self, email: &str) -> DeliverabilityResult {
        let parsed = parse_address(email)?;
        match self.resolver {
            Some(ref resolver) => self.check_domain(resolver, &parsed.domain).await,
            None => Ok(()),
        }
    }
}
