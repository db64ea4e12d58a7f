//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Return the first candidate that is present, in declared priority order.
///
/// Values are never merged: the first `Some` wins even when a later
/// candidate carries more text.
pub fn first_present<const N: usize>(candidates: [&Option<String>; N]) -> Option<String> {
    candidates.into_iter().find_map(Clone::clone)
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" https://example.com ".to_string())),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn first_present_keeps_declared_order() {
        let organization = None;
        let company = Some("Acme".to_string());
        let legacy = Some("Acme Legacy".to_string());
        assert_eq!(
            first_present([&organization, &company, &legacy]).as_deref(),
            Some("Acme")
        );
    }

    #[test]
    fn first_present_does_not_skip_empty_strings() {
        let organization = Some(String::new());
        let company = Some("Acme".to_string());
        assert_eq!(
            first_present([&organization, &company]).as_deref(),
            Some("")
        );
    }

    #[test]
    fn first_present_returns_none_when_all_missing() {
        let a: Option<String> = None;
        let b: Option<String> = None;
        assert_eq!(first_present([&a, &b]), None);
    }

    #[test]
    fn is_http_url_accepts_valid_schemes() {
        assert!(is_http_url("http://localhost"));
        assert!(is_http_url("https://example.com"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn compact_text_truncates_long_bodies() {
        let long = "x".repeat(500);
        assert_eq!(compact_text(&long).len(), 180);
    }
}
