//! Result types produced by validation: per-address verdicts, their tabular
//! rendering, and the ordered batch sequence.

use serde::Serialize;
use std::fmt;

/// Placeholder recorded as the domain when an address has no `@`.
pub const DOMAIN_SENTINEL: &str = "invalid";

/// The domain portion of an address, or the sentinel when none exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainPart {
    /// Everything after the first `@`, exactly as given.
    Address(String),
    /// The input contained no `@`.
    Invalid,
}

impl DomainPart {
    pub fn as_str(&self) -> &str {
        match self {
            DomainPart::Address(domain) => domain,
            DomainPart::Invalid => DOMAIN_SENTINEL,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, DomainPart::Invalid)
    }
}

impl fmt::Display for DomainPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured outcome of validating one input string.
///
/// Built once by the validator and never changed afterwards; fields are only
/// readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailVerdict {
    pub(crate) email: String,
    pub(crate) syntax_valid: bool,
    pub(crate) domain: DomainPart,
    pub(crate) disposable: bool,
    pub(crate) deliverable: bool,
    pub(crate) failure_reason: Option<String>,
}

impl EmailVerdict {
    /// The input exactly as given.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn syntax_valid(&self) -> bool {
        self.syntax_valid
    }

    pub fn domain(&self) -> &DomainPart {
        &self.domain
    }

    pub fn disposable(&self) -> bool {
        self.disposable
    }

    pub fn deliverable(&self) -> bool {
        self.deliverable
    }

    /// Message from a failed deliverability check, if it failed.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// The display/export row for this verdict.
    pub fn to_record(&self) -> VerdictRecord {
        VerdictRecord::from(self)
    }
}

/// Column headers of the tabular output, in order.
pub const RECORD_HEADERS: [&str; 6] = [
    "Email",
    "Valid Email",
    "Domain Address",
    "Disposable Email",
    "Deliverable Email",
    "Reason",
];

/// A verdict rendered with the human-facing labels used for display and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictRecord {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Valid Email")]
    pub valid_email: String,
    #[serde(rename = "Domain Address")]
    pub domain_address: String,
    #[serde(rename = "Disposable Email")]
    pub disposable_email: String,
    #[serde(rename = "Deliverable Email")]
    pub deliverable_email: String,
    #[serde(rename = "Reason")]
    pub reason: String,
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "Yes" } else { "No" };
    label.to_string()
}

impl From<&EmailVerdict> for VerdictRecord {
    fn from(verdict: &EmailVerdict) -> Self {
        VerdictRecord {
            email: verdict.email.clone(),
            valid_email: if verdict.syntax_valid {
                "Valid Email"
            } else {
                "Invalid Email"
            }
            .to_string(),
            domain_address: verdict.domain.to_string(),
            disposable_email: yes_no(verdict.disposable),
            deliverable_email: yes_no(verdict.deliverable),
            reason: verdict
                .failure_reason
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl VerdictRecord {
    /// Cell values in [`RECORD_HEADERS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.email,
            &self.valid_email,
            &self.domain_address,
            &self.disposable_email,
            &self.deliverable_email,
            &self.reason,
        ]
    }
}

/// Ordered verdicts for a bulk run: one entry per input row, same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    verdicts: Vec<EmailVerdict>,
}

impl BatchResult {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            verdicts: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, verdict: EmailVerdict) {
        self.verdicts.push(verdict);
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EmailVerdict> {
        self.verdicts.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmailVerdict> {
        self.verdicts.iter()
    }

    pub fn verdicts(&self) -> &[EmailVerdict] {
        &self.verdicts
    }

    pub fn records(&self) -> Vec<VerdictRecord> {
        self.verdicts.iter().map(VerdictRecord::from).collect()
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.verdicts.len(),
            ..BatchSummary::default()
        };
        for verdict in &self.verdicts {
            summary.syntax_valid += usize::from(verdict.syntax_valid);
            summary.disposable += usize::from(verdict.disposable);
            summary.deliverable += usize::from(verdict.deliverable);
        }
        summary
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a EmailVerdict;
    type IntoIter = std::slice::Iter<'a, EmailVerdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.verdicts.iter()
    }
}

/// Headline counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub syntax_valid: usize,
    pub disposable: usize,
    pub deliverable: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checked: {} valid syntax, {} disposable, {} deliverable",
            self.total, self.syntax_valid, self.disposable, self.deliverable
        )
    }
}
