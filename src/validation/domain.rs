//! Domain extraction from a raw input string.

use crate::core::models::DomainPart;

/// Returns everything after the first `@`, or the sentinel if there is none.
///
/// The remainder is taken verbatim, including any further `@` characters.
pub fn extract_domain(email: &str) -> DomainPart {
    match email.split_once('@') {
        Some((_, domain)) => DomainPart::Address(domain.to_string()),
        None => DomainPart::Invalid,
    }
}
