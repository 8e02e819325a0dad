//! Email canonicalization.
//!
//! Addresses are lowercased, and gmail's equivalence rules (dots and `+tag`
//! sub-addresses are ignored, `googlemail.com` equals `gmail.com`) are folded
//! away so one mailbox cannot register twice.

/// Gmail domains sharing the same mailbox namespace.
const GMAIL_DOMAINS: [&str; 2] = ["gmail.com", "googlemail.com"];

/// Canonicalize an email address.
///
/// Returns `None` when the input is not shaped like an email at all (no `@`,
/// empty local part or domain); validation rejects those separately.
pub fn normalize_email(raw: &str) -> Option<String> {
    let (local, domain) = raw.rsplit_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }

    let mut local = local.to_lowercase();
    let domain = domain.to_lowercase();

    if GMAIL_DOMAINS.contains(&domain.as_str()) {
        if let Some((stem, _tag)) = local.split_once('+') {
            local = stem.to_string();
        }
        local.retain(|c| c != '.');
        return Some(format!("{}@gmail.com", local));
    }

    Some(format!("{}@{}", local, domain))
}

/// Loose structural check for an email address.
///
/// One `@`, a non-empty local part, and a domain with at least one dot and no
/// whitespace. Deliverability is the mail system's problem, not ours.
pub fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
        && !local.contains('@')
}
