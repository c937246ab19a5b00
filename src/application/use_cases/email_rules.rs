use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use crate::domain::contacts::EmailRule;

// Liberal but solid address shape for the strict rule
static STRICT_EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap());

/// Check an email against the configured rule
pub fn looks_valid(email: &str, rule: EmailRule) -> bool {
    match rule {
        EmailRule::Basic => has_basic_shape(email),
        EmailRule::Strict => has_basic_shape(email) && has_strict_shape(email),
    }
}

/// One `@`, non-empty local and domain parts, a `.` in the domain, no whitespace
fn has_basic_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && domain.contains('.')
        }
        _ => false,
    }
}

fn has_strict_shape(email: &str) -> bool {
    let email = email.to_lowercase();
    if !STRICT_EMAIL_PATTERN.is_match(&email) || !email.validate_email() {
        return false;
    }
    if email.contains("..") {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let edge: &[char] = &['.', '-'];
    let bad_edge = |s: &str| s.starts_with(edge) || s.ends_with(edge);
    if bad_edge(local) || bad_edge(domain) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels
        .iter()
        .any(|label| label.is_empty() || label.starts_with('-') || label.ends_with('-'))
    {
        return false;
    }

    labels.last().map_or(false, |tld| tld.len() >= 2)
}
