use url::Url;

/// Returns the directory a URL lives in
///
/// `http://example.com/docs/page.html` lives in `http://example.com/docs/`;
/// a URL that already ends in `/` is its own directory.
pub fn directory_prefix(url: &Url) -> Url {
    url.join(".").unwrap_or_else(|_| url.clone())
}

/// Resolves a link href against the directory of the page it was found on
///
/// Returns `None` for hrefs that point nowhere (empty or fragment-only).
/// Hrefs the URL parser cannot resolve are returned verbatim so the caller
/// can reject them with the syntax rule. Fragments are dropped.
pub fn resolve_link(directory: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match directory.join(href) {
        Ok(mut absolute) => {
            absolute.set_fragment(None);
            Some(absolute.to_string())
        }
        Err(_) => Some(href.to_string()),
    }
}

/// Parses a configured seed into the first URL to crawl, `<seed>/`
pub fn seed_start_url(seed: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}/", seed.trim_end_matches('/')))
}

/// Scope string links are tested against: the serialized start URL without
/// its trailing `/`
///
/// Links are compared in their serialized form, so the scheme and host are
/// lowercased and a default port is dropped here as well.
///
/// # Examples
///
/// ```
/// use quarry::url::{seed_scope, seed_start_url};
///
/// let start = seed_start_url("HTTP://Example.com:80/docs").unwrap();
/// assert_eq!(seed_scope(&start), "http://example.com/docs");
/// ```
pub fn seed_scope(start_url: &Url) -> String {
    start_url.as_str().trim_end_matches('/').to_string()
}

/// Returns `scheme://host[:port]` for a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use quarry::url::domain_root;
///
/// let url = Url::parse("http://lyle.smu.edu/~fmoore/index.htm").unwrap();
/// assert_eq!(domain_root(&url), "http://lyle.smu.edu");
/// ```
pub fn domain_root(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Strips the domain root from a URL, leaving a domain-relative path
pub fn relative_to_domain(url: &str, domain_root: &str) -> String {
    url.replacen(domain_root, "", 1)
}

/// Last path segment of a URL, used as a title when a page has none
pub fn last_segment(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last().map(str::to_string))
        .unwrap_or_default()
}
