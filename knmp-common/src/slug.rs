//! URL slugs derived from names

use unicode_normalization::UnicodeNormalization;

/// Longest slug stem; leaves room for a uniqueness suffix within 255 chars
pub const MAX_SLUG_STEM_LEN: usize = 240;

/// Stem used when a name has no ASCII letters or digits
pub const FALLBACK_SLUG: &str = "person";

/// Convert a name to a lowercase, hyphen-separated slug
///
/// Accented letters are folded to ASCII through NFKD decomposition. ASCII
/// letters, digits and underscores are kept, runs of whitespace and hyphens
/// collapse to one hyphen, and everything else is dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.nfkd() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    let slug = slug.trim_matches(|c| c == '-' || c == '_');
    let mut slug: String = slug.chars().take(MAX_SLUG_STEM_LEN).collect();
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Candidate slug for the n-th collision (n = 1 is the bare stem)
pub fn with_suffix(stem: &str, n: u32) -> String {
    if n <= 1 {
        stem.to_string()
    } else {
        format!("{}-{}", stem, n)
    }
}
