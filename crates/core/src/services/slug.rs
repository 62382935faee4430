//! Slug derivation for taxonomy and article URLs.

/// Derive a URL slug from a display name.
///
/// Lowercases, keeps ASCII alphanumerics, and collapses everything else
/// into single hyphens.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Local News"), "local-news");
        assert_eq!(slugify("  Sports &  Leisure  "), "sports-leisure");
        assert_eq!(slugify("Election 2026!"), "election-2026");
    }

    #[test]
    fn test_slugify_drops_leading_and_trailing_separators() {
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("***"), "");
    }
}
