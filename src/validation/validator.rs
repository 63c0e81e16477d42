//! Turns one input string into one [`EmailVerdict`].

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::models::EmailVerdict;
use crate::validation::deliverability::{DeliverabilityCheck, DnsDeliverabilityChecker};
use crate::validation::disposable::{DisposableCheck, DomainListChecker};
use crate::validation::domain::extract_domain;
use crate::validation::syntax::matches_pattern;
use regex::Regex;

/// Recorded when a deliverability check fails without saying why.
pub const UNSPECIFIED_FAILURE_REASON: &str = "The email address could not be verified.";

/// Runs the syntax, domain, disposable and deliverability steps for an address.
///
/// The steps are independent: a syntactically invalid address is still looked
/// up, and the syntax verdict is never overridden by the deliverability one.
#[derive(Debug, Clone)]
pub struct Validator<D, L> {
    email_regex: Regex,
    disposable: D,
    deliverability: L,
}

/// The validator wired to the built-in checkers.
pub type DefaultValidator = Validator<DomainListChecker, DnsDeliverabilityChecker>;

impl DefaultValidator {
    /// Builds the standard checkers from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Validator::new(
            config.email_regex.clone(),
            DomainListChecker::from_config(config)?,
            DnsDeliverabilityChecker::from_config(config)?,
        ))
    }
}

impl<D, L> Validator<D, L>
where
    D: DisposableCheck,
    L: DeliverabilityCheck,
{
    pub fn new(email_regex: Regex, disposable: D, deliverability: L) -> Self {
        Self {
            email_regex,
            disposable,
            deliverability,
        }
    }

    /// Produces the verdict for `email`. Never fails: malformed input and
    /// failed lookups are recorded in the verdict.
    pub async fn verify(&self, email: &str) -> EmailVerdict {
        let syntax_valid = matches_pattern(&self.email_regex, email);
        let domain = extract_domain(email);
        let disposable = self.disposable.is_disposable(email);

        let (deliverable, failure_reason) = match self.deliverability.check(email).await {
            Ok(()) => (true, None),
            Err(failure) => {
                tracing::debug!(target: "validation", "{} not deliverable: {}", email, failure);
                let reason = failure.reason().trim();
                let reason = if reason.is_empty() {
                    UNSPECIFIED_FAILURE_REASON
                } else {
                    reason
                };
                (false, Some(reason.to_string()))
            }
        };

        EmailVerdict {
            email: email.to_string(),
            syntax_valid,
            domain,
            disposable,
            deliverable,
            failure_reason,
        }
    }
}
