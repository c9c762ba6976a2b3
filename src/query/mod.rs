//! Query normalization
//!
//! Raw query text is canonicalized before any lookup so that queries differing only in
//! surrounding whitespace or letter case are served identically.

/// Canonical form of a raw query: surrounding whitespace trimmed, all characters lower-cased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whitespace-separated terms of an already canonical query
pub fn terms(canonical: &str) -> impl Iterator<Item = &str> {
    canonical.split_whitespace()
}
