//! URL and text helpers shared by the converters.

use once_cell::sync::Lazy;
use regex::Regex;

static CSS_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(['"]?([^'"]*?)['"]?\)"#).expect("valid regex"));

/// Resolve protocol-relative and root-relative URLs against `origin`
pub fn absolutize(url: &str, origin: &str) -> String {
    let url = url.trim();
    if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else if url.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

/// Drop the query string from an image source
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// URL of the `background-image` (or `background`) declaration in an inline
/// style attribute
pub fn background_image_url(style: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(property, _)| {
            matches!(
                property.trim().to_ascii_lowercase().as_str(),
                "background-image" | "background"
            )
        })
        .find_map(|(_, value)| {
            CSS_URL_RE
                .captures(value)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|url| !url.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize() {
        let origin = "https://docs.qq.com";
        assert_eq!(absolutize("//x.com/a", origin), "https://x.com/a");
        assert_eq!(absolutize("/doc/abc", origin), "https://docs.qq.com/doc/abc");
        assert_eq!(absolutize("/doc/abc", "https://docs.qq.com/"), "https://docs.qq.com/doc/abc");
        assert_eq!(absolutize("https://a.b/c", origin), "https://a.b/c");
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("https://x.com/a.png?w=1&h=2"), "https://x.com/a.png");
        assert_eq!(strip_query("a.png"), "a.png");
    }

    #[test]
    fn test_background_image_url() {
        assert_eq!(
            background_image_url(r#"width: 10px; background-image: url("https://x.com/a.png?x=1")"#),
            Some("https://x.com/a.png?x=1".to_string())
        );
        assert_eq!(
            background_image_url("background: url(https://x.com/b.png) no-repeat"),
            Some("https://x.com/b.png".to_string())
        );
        assert_eq!(background_image_url("background-image: none"), None);
        assert_eq!(background_image_url("color: red"), None);
    }
}
