//! Email address syntax validation.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Check whether a string looks like a deliverable email address.
///
/// Intentionally stricter than RFC 5321 (no quoted local parts, no bare
/// domains): this gates what a voice transcription may have produced, where
/// exotic syntax is far more likely to be a mishearing than intentional.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}
