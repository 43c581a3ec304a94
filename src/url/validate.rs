use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(
        r"(?i)^(?:http|ftp)s?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$"
    )
    .expect("valid URL pattern");
}

/// Checks a URL string against the crawler's syntax rule
///
/// The scheme must be http, https, ftp or ftps. The host must be a DNS-style
/// name, `localhost`, or a dotted-quad IPv4 address, optionally followed by a
/// port and a path.
///
/// # Examples
///
/// ```
/// use quarry::url::url_is_valid;
///
/// assert!(url_is_valid("http://example.com/page.html"));
/// assert!(url_is_valid("https://localhost:8080/"));
/// assert!(!url_is_valid("mailto:someone@example.com"));
/// ```
pub fn url_is_valid(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}
