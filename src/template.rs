use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;
use crate::error::LaunchError;

/// Placeholder spellings, canonical first. `${Q}` is the older bracketed form.
pub const PLACEHOLDERS: [&str; 2] = ["%s", "${Q}"];

const PROBE: &str = "test";

/// Characters a URI component keeps as-is, matching `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn placeholder_in(url: &str) -> Option<&'static str> {
    PLACEHOLDERS.iter().copied().find(|p| url.contains(p))
}

pub fn has_placeholder(url: &str) -> bool {
    placeholder_in(url).is_some()
}

/// Checks that `url` parses as an absolute URL once every placeholder is
/// replaced by a probe value.
pub fn is_valid(url: &str) -> bool {
    let probed = PLACEHOLDERS
        .iter()
        .fold(url.to_string(), |acc, p| acc.replace(p, PROBE));
    Url::parse(&probed).is_ok()
}

/// Substitutes the percent-encoded `query` into the first placeholder.
/// Templates without a placeholder come back unchanged.
pub fn render(url: &str, query: &str) -> Result<String, LaunchError> {
    let rendered = match placeholder_in(url) {
        Some(token) => {
            let encoded = utf8_percent_encode(query, COMPONENT).to_string();
            url.replacen(token, &encoded, 1)
        }
        None => url.to_string(),
    };

    if Url::parse(&rendered).is_err() {
        return Err(LaunchError::InvalidUrl { url: rendered });
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_urls_validate_as_is() {
        assert!(is_valid("https://github.com/"));
        assert!(!is_valid("not a url"));
        assert!(!is_valid(""));
        assert!(!is_valid("://missing-scheme.com"));
    }

    #[test]
    fn placeholders_are_probed() {
        assert!(is_valid("https://x.com/?q=%s"));
        assert!(is_valid("https://x.com/?q=${Q}"));
        assert!(!is_valid("%s"));
        assert!(is_valid("%s://example.com"));
    }

    #[test]
    fn render_encodes_query() {
        assert_eq!(
            render("https://x.com/?q=%s", "a b&c").unwrap(),
            "https://x.com/?q=a%20b%26c"
        );
        assert_eq!(
            render("https://x.com/?q=%s", "c# tips").unwrap(),
            "https://x.com/?q=c%23%20tips"
        );
    }

    #[test]
    fn render_keeps_component_safe_punctuation() {
        assert_eq!(
            render("https://en.wikipedia.org/wiki/%s", "Rust (lang)!*'").unwrap(),
            "https://en.wikipedia.org/wiki/Rust%20(lang)!*'"
        );
        assert_eq!(
            render("https://x.com/?q=%s", "a/b?c=d+é").unwrap(),
            "https://x.com/?q=a%2Fb%3Fc%3Dd%2B%C3%A9"
        );
    }

    #[test]
    fn render_accepts_bracketed_placeholder() {
        assert_eq!(
            render("https://duckduckgo.com/?q=${Q}", "rust").unwrap(),
            "https://duckduckgo.com/?q=rust"
        );
    }

    #[test]
    fn render_without_placeholder_ignores_query() {
        for q in ["", "anything", "a b&c"] {
            assert_eq!(render("https://github.com", q).unwrap(), "https://github.com");
        }
    }

    #[test]
    fn render_replaces_first_occurrence_only() {
        assert_eq!(
            render("https://x.com/%s?again=%s", "q").unwrap(),
            "https://x.com/q?again=%s"
        );
    }

    #[test]
    fn render_rejects_unparseable_result() {
        assert_eq!(
            render("nonsense %s", "q"),
            Err(LaunchError::InvalidUrl { url: "nonsense q".to_string() })
        );
    }
}
