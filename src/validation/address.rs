//! Strict address shape rules applied before any DNS work.
//!
//! These mirror what a mail server would accept, which is much narrower than
//! the permissive pattern in [`super::syntax`]. Every rejection carries a
//! message suitable for the `Reason` column.

use crate::core::error::DeliverabilityFailure;

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

const LOCAL_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~.";

/// Names reserved for special use that never receive mail.
const SPECIAL_USE_DOMAINS: &[&str] = &["arpa", "invalid", "local", "localhost", "onion", "test"];

/// An address split at its last `@` that passed every shape rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress<'a> {
    pub local_part: &'a str,
    /// Lowercased domain, ready for DNS queries.
    pub domain: String,
}

type ShapeResult<T> = std::result::Result<T, DeliverabilityFailure>;

fn reject<T>(message: impl Into<String>) -> ShapeResult<T> {
    Err(DeliverabilityFailure::Syntax(message.into()))
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn describe_char(c: char) -> String {
    match c {
        ' ' => "SPACE".to_string(),
        '\t' => "TAB".to_string(),
        '\r' | '\n' => "LINE BREAK".to_string(),
        c if c.is_control() || c.is_whitespace() => format!("U+{:04X}", c as u32),
        c => format!("'{}'", c),
    }
}

fn list_invalid_chars(text: &str, allowed: impl Fn(char) -> bool) -> Option<String> {
    let mut bad: Vec<char> = text.chars().filter(|c| !allowed(*c)).collect();
    if bad.is_empty() {
        return None;
    }
    bad.sort_unstable();
    bad.dedup();
    Some(
        bad.into_iter()
            .map(describe_char)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn is_local_char(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c)
    } else {
        !c.is_whitespace() && !c.is_control()
    }
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.' || (!c.is_ascii() && c.is_alphanumeric())
}

/// Checks `email` against the shape rules and splits it.
pub fn parse_address(email: &str) -> ShapeResult<ParsedAddress<'_>> {
    let Some((local_part, domain)) = email.rsplit_once('@') else {
        return reject("An email address must have an @-sign.");
    };

    if local_part.is_empty() {
        return reject("There must be something before the @-sign.");
    }
    if domain.is_empty() {
        return reject("There must be something after the @-sign.");
    }

    let total_len = email.chars().count();
    if total_len > MAX_ADDRESS_LEN {
        let over = total_len - MAX_ADDRESS_LEN;
        return reject(format!(
            "The email address is too long ({} character{} too many).",
            over,
            plural(over)
        ));
    }

    check_local_part(local_part)?;
    let domain = check_domain(domain)?;

    Ok(ParsedAddress { local_part, domain })
}

fn check_local_part(local: &str) -> ShapeResult<()> {
    let len = local.chars().count();
    if len > MAX_LOCAL_LEN {
        let over = len - MAX_LOCAL_LEN;
        return reject(format!(
            "The email address is too long before the @-sign ({} character{} too many).",
            over,
            plural(over)
        ));
    }

    if let Some(bad) = list_invalid_chars(local, is_local_char) {
        return reject(format!(
            "The email address contains invalid characters before the @-sign: {}.",
            bad
        ));
    }

    if local.starts_with('.') {
        return reject("An email address cannot start with a period.");
    }
    if local.ends_with('.') {
        return reject("An email address cannot have a period immediately before the @-sign.");
    }
    if local.contains("..") {
        return reject("An email address cannot have two periods in a row.");
    }
    Ok(())
}

fn check_domain(domain: &str) -> ShapeResult<String> {
    if let Some(bad) = list_invalid_chars(domain, is_domain_char) {
        return reject(format!(
            "The part after the @-sign contains invalid characters: {}.",
            bad
        ));
    }

    if domain.starts_with('.') {
        return reject("An email address cannot have a period immediately after the @-sign.");
    }
    if domain.ends_with('.') {
        return reject("An email address cannot end with a period.");
    }
    if domain.contains("..") {
        return reject("An email address cannot have two periods in a row.");
    }

    if domain.chars().count() > MAX_DOMAIN_LEN {
        return reject("The email address is too long after the @-sign.");
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let last = labels.len() - 1;
    for (i, label) in labels.iter().enumerate() {
        if label.starts_with('-') {
            return reject(if i == 0 {
                "An email address cannot have a hyphen immediately after the @-sign."
            } else {
                "An email address cannot have a period and a hyphen next to each other."
            });
        }
        if label.ends_with('-') {
            return reject(if i == last {
                "An email address cannot end with a hyphen."
            } else {
                "An email address cannot have a period and a hyphen next to each other."
            });
        }
        let len = label.chars().count();
        if len > MAX_LABEL_LEN {
            let over = len - MAX_LABEL_LEN;
            return reject(format!(
                "After the @-sign, periods cannot be separated by so many characters ({} character{} too many).",
                over,
                plural(over)
            ));
        }
    }

    if labels.len() < 2 {
        return reject("The part after the @-sign is not valid. It should have a period.");
    }
    if labels[last].chars().all(|c| c.is_ascii_digit()) {
        return reject(
            "The part after the @-sign is not valid. It is not within a valid top-level domain.",
        );
    }

    let lowered = domain.to_lowercase();
    let reserved = SPECIAL_USE_DOMAINS.iter().any(|name| {
        lowered == *name || lowered.ends_with(&format!(".{}", name))
    });
    if reserved {
        return reject(
            "The part after the @-sign is a special-use or reserved name that cannot be used with email.",
        );
    }

    Ok(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(email: &str) -> String {
        parse_address(email).unwrap_err().reason().to_string()
    }

    #[test]
    fn accepts_ordinary_addresses() {
        let parsed = parse_address("First.Last+tag@Example.COM").unwrap();
        assert_eq!(parsed.local_part, "First.Last+tag");
        assert_eq!(parsed.domain, "example.com");
        assert!(parse_address("o'brien@sub.example.org").is_ok());
        assert!(parse_address("josé@example.com").is_ok());
    }

    #[test]
    fn requires_at_sign_and_both_parts() {
        assert_eq!(reason("not-an-email"), "An email address must have an @-sign.");
        assert_eq!(reason(""), "An email address must have an @-sign.");
        assert_eq!(reason("@example.com"), "There must be something before the @-sign.");
        assert_eq!(reason("user@"), "There must be something after the @-sign.");
    }

    #[test]
    fn splits_at_last_at_sign() {
        assert_eq!(
            reason("a@b@c.org"),
            "The email address contains invalid characters before the @-sign: '@'."
        );
    }

    #[test]
    fn reports_invalid_characters() {
        assert_eq!(
            reason("john doe@example.com"),
            "The email address contains invalid characters before the @-sign: SPACE."
        );
        assert_eq!(
            reason("user@exa_mple.com"),
            "The part after the @-sign contains invalid characters: '_'."
        );
    }

    #[test]
    fn period_placement() {
        assert_eq!(reason(".user@example.com"), "An email address cannot start with a period.");
        assert_eq!(
            reason("user.@example.com"),
            "An email address cannot have a period immediately before the @-sign."
        );
        assert_eq!(reason("us..er@example.com"), "An email address cannot have two periods in a row.");
        assert_eq!(
            reason("user@.example.com"),
            "An email address cannot have a period immediately after the @-sign."
        );
        assert_eq!(reason("user@example.com."), "An email address cannot end with a period.");
    }

    #[test]
    fn hyphen_placement() {
        assert_eq!(
            reason("user@-example.com"),
            "An email address cannot have a hyphen immediately after the @-sign."
        );
        assert_eq!(
            reason("user@example-.com"),
            "An email address cannot have a period and a hyphen next to each other."
        );
        assert_eq!(reason("user@example.com-"), "An email address cannot end with a hyphen.");
    }

    #[test]
    fn length_limits() {
        let local = "a".repeat(65);
        assert_eq!(
            reason(&format!("{}@example.com", local)),
            "The email address is too long before the @-sign (1 character too many)."
        );
        let label = "b".repeat(64);
        assert_eq!(
            reason(&format!("user@{}.com", label)),
            "After the @-sign, periods cannot be separated by so many characters (1 character too many)."
        );
        let long = format!("user@{}.com", vec!["c".repeat(60); 5].join("."));
        assert!(reason(&long).starts_with("The email address is too long"));
    }

    #[test]
    fn domain_needs_a_real_top_level() {
        assert_eq!(
            reason("user@localhost"),
            "The part after the @-sign is not valid. It should have a period."
        );
        assert_eq!(
            reason("user@10.0.0.1"),
            "The part after the @-sign is not valid. It is not within a valid top-level domain."
        );
    }

    #[test]
    fn special_use_names_are_rejected() {
        for email in ["user@host.test", "user@printer.local", "x@example.invalid", "x@a.onion"] {
            assert_eq!(
                reason(email),
                "The part after the @-sign is a special-use or reserved name that cannot be used with email.",
                "{}",
                email
            );
        }
    }
}
