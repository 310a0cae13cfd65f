// Pure href normalization - no store or render imports allowed.
// Stored hrefs are always site-relative (path + query + fragment) so that
// the same page compares equal no matter how its URL arrived here. Purely
// local string manipulation; no DNS, no prefetch, no network.

use url::Url;

/// Reduces `input` to the site-relative href used as a tab identity.
///
/// 1. Empty input means the root path.
/// 2. Absolute http/https URLs are stripped to path + query + fragment.
/// 3. Site-relative paths pass through unchanged.
/// 4. Anything unparsable is returned trimmed; identity still works, it is
///    just never equal to a normalized href.
pub fn normalize_href(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    if trimmed.contains("://") {
        if let Ok(u) = Url::parse(trimmed) {
            if u.scheme() == "http" || u.scheme() == "https" {
                let mut href = u.path().to_string();
                if let Some(query) = u.query() {
                    href.push('?');
                    href.push_str(query);
                }
                if let Some(fragment) = u.fragment() {
                    href.push('#');
                    href.push_str(fragment);
                }
                return href;
            }
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    // Site-relative paths pass through
    #[case("/", "/")]
    #[case("/reports", "/reports")]
    #[case("/reports?sort=asc", "/reports?sort=asc")]
    #[case("/reports#section", "/reports#section")]
    // Absolute URLs reduce to path + query + fragment
    #[case("https://example.com/", "/")]
    #[case("https://example.com/reports", "/reports")]
    #[case("http://example.com/reports?sort=asc#top", "/reports?sort=asc#top")]
    #[case("https://example.com:8443/billing", "/billing")]
    // Whitespace is trimmed
    #[case("  /reports  ", "/reports")]
    // Empty means root
    #[case("", "/")]
    #[case("   ", "/")]
    // Non-web schemes are left alone
    #[case("about:blank", "about:blank")]
    fn test_normalize_href(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_href(input), expected);
    }
}
