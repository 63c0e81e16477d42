//! Disposable (throwaway) mailbox provider detection.

use crate::core::config::Config;
use crate::core::error::Result;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Answers whether an address belongs to a throwaway mailbox provider.
///
/// The answer is treated as authoritative; callers do not retry.
pub trait DisposableCheck {
    fn is_disposable(&self, email: &str) -> bool;
}

impl<F> DisposableCheck for F
where
    F: Fn(&str) -> bool,
{
    fn is_disposable(&self, email: &str) -> bool {
        self(email)
    }
}

/// Well-known temporary mailbox providers shipped with the binary.
static BUILTIN_DISPOSABLE_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "0-mail.com",
        "10minutemail.com",
        "10minutemail.net",
        "20minutemail.com",
        "33mail.com",
        "anonbox.net",
        "burnermail.io",
        "discard.email",
        "dispostable.com",
        "dropmail.me",
        "emailondeck.com",
        "fakeinbox.com",
        "getairmail.com",
        "getnada.com",
        "guerrillamail.biz",
        "guerrillamail.com",
        "guerrillamail.de",
        "guerrillamail.info",
        "guerrillamail.net",
        "guerrillamail.org",
        "guerrillamailblock.com",
        "harakirimail.com",
        "incognitomail.org",
        "jetable.org",
        "mail-temp.com",
        "mailcatch.com",
        "maildrop.cc",
        "mailinator.com",
        "mailinator.net",
        "mailnesia.com",
        "mintemail.com",
        "mohmal.com",
        "mytemp.email",
        "nada.email",
        "sharklasers.com",
        "spam4.me",
        "spambox.us",
        "spamgourmet.com",
        "tempail.com",
        "tempinbox.com",
        "tempmail.com",
        "tempmail.net",
        "tempmailo.com",
        "temp-mail.io",
        "temp-mail.org",
        "tempr.email",
        "throwawaymail.com",
        "trashmail.com",
        "trashmail.de",
        "trashmail.net",
        "yopmail.com",
        "yopmail.fr",
        "yopmail.net",
    ]
    .into_iter()
    .collect()
});

/// Checks the domain of an address against the built-in list plus any
/// configured extras.
///
/// Matching is case-insensitive on the part after the last `@`, and a
/// subdomain of a listed domain counts as disposable.
#[derive(Debug, Clone, Default)]
pub struct DomainListChecker {
    extra_domains: HashSet<String>,
}

impl DomainListChecker {
    /// A checker using only the built-in list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds domains on top of the built-in list.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_domains.extend(
            domains
                .into_iter()
                .filter_map(|d| normalize_domain(d.as_ref())),
        );
        self
    }

    /// Builds a checker from the configured extra domains and domains file.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut checker = Self::new().with_domains(&config.disposable_extra_domains);
        if let Some(ref path) = config.disposable_domains_file {
            let loaded = load_domains_file(Path::new(path))?;
            tracing::info!(
                target: "validation",
                "Loaded {} disposable domains from {}",
                loaded.len(),
                path
            );
            checker = checker.with_domains(loaded);
        }
        Ok(checker)
    }

    /// Number of domains beyond the built-in list.
    pub fn extra_len(&self) -> usize {
        self.extra_domains.len()
    }

    fn is_listed(&self, domain: &str) -> bool {
        BUILTIN_DISPOSABLE_DOMAINS.contains(domain) || self.extra_domains.contains(domain)
    }

    /// Checks a bare domain name, including its parent domains.
    pub fn is_disposable_domain(&self, domain: &str) -> bool {
        let Some(domain) = normalize_domain(domain) else {
            return false;
        };
        let mut candidate = domain.as_str();
        loop {
            if self.is_listed(candidate) {
                return true;
            }
            match candidate.split_once('.') {
                Some((_, parent)) if parent.contains('.') => candidate = parent,
                _ => return false,
            }
        }
    }
}

impl DisposableCheck for DomainListChecker {
    fn is_disposable(&self, email: &str) -> bool {
        match email.rsplit_once('@') {
            Some((_, domain)) => self.is_disposable_domain(domain),
            None => false,
        }
    }
}

fn normalize_domain(domain: &str) -> Option<String> {
    let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

/// Reads one domain per line; blank lines and `#` comments are skipped.
pub fn load_domains_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
