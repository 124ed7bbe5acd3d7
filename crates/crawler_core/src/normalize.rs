use url::Url;

/// Normalizes a URL for visited-cache deduplication.
///
/// Strips the fragment and any trailing slash on a non-root path, so
/// `https://a.test/docs/`, `https://a.test/docs#intro` and
/// `https://a.test/docs` all share one cache slot. Input that does not parse
/// as a URL is returned trimmed and otherwise unchanged.
pub fn normalize_url_for_dedupe(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(mut url) = Url::parse(trimmed) else {
        return trimmed.to_string();
    };

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let shortened = path.trim_end_matches('/').to_string();
        url.set_path(&shortened);
    }

    url.to_string()
}
