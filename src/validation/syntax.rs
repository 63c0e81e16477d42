//! Permissive shape check for email addresses.
//!
//! The pattern is searched for anywhere in the input, so text that merely
//! contains an address-looking run is reported as valid.

use regex::Regex;

/// Tests `email` against `pattern`. No network or filesystem access.
pub fn matches_pattern(pattern: &Regex, email: &str) -> bool {
    pattern.is_match(email)
}
