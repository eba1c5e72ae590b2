//! Target domain normalization and hostname candidate filtering

use crate::error::{Result, SubenumError};

/// Normalize a user-supplied target domain
///
/// This function:
/// - Trims surrounding whitespace and converts to lowercase
/// - Removes http:// and https:// prefixes
/// - Removes trailing slashes and paths
/// - Removes trailing dots (`example.com.` is the same zone as `example.com`)
/// - Rejects empty input, inner whitespace, wildcards, and URL delimiters
///   (`?`, `#`, `@`, `:`) that would leak into provider URLs
///
/// The `www.` label is kept: it is a valid root to enumerate beneath.
/// No further DNS syntax checks are made; the result is an opaque key.
pub fn normalize_domain(domain: &str) -> Result<String> {
    let domain = domain.trim().to_lowercase();

    // Remove protocol
    let domain = domain
        .strip_prefix("http://")
        .or_else(|| domain.strip_prefix("https://"))
        .unwrap_or(&domain);

    // Remove trailing slash and path
    let domain = domain.split('/').next().unwrap_or(domain);

    let domain = domain.trim_end_matches('.');

    if domain.is_empty() {
        return Err(SubenumError::InvalidDomain("domain is empty".to_string()));
    }

    if domain
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '*' | '?' | '#' | '@' | ':'))
    {
        return Err(SubenumError::InvalidDomain(domain.to_string()));
    }

    Ok(domain.to_string())
}

/// Accept a raw hostname from a provider if it is a proper subdomain of `domain`.
///
/// `domain` must already be normalized. The candidate is trimmed and lowercased,
/// then kept only if it ends with `.<domain>` and carries no wildcard marker.
/// Providers are not trusted to have filtered this themselves.
pub fn accept_candidate(raw: &str, domain: &str) -> Option<String> {
    let candidate = raw.trim().to_lowercase();

    if candidate.contains('*') {
        return None;
    }

    let prefix = candidate.strip_suffix(domain)?;
    if prefix.len() < 2 || !prefix.ends_with('.') {
        return None;
    }

    Some(candidate)
}
