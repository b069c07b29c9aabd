use std::sync::LazyLock;

use regex::Regex;

/// Practical upper bound on address length.
pub const MAX_EMAIL_LEN: usize = 320;

// literal pattern, covered by `pattern_compiles`
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

// rejected outright so the value is safe to echo into markup
const MARKUP_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Permissive syntactic email check. Not RFC 5321: some exotic but valid
/// addresses are rejected.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().count() > MAX_EMAIL_LEN {
        return false;
    }
    if email.contains(MARKUP_CHARS) {
        return false;
    }
    EMAIL_PATTERN.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
