//! Per-request decision rules for the offline asset service.
//!
//! Pure functions, no I/O. The worker consults these before touching the
//! cache store or the network.

/// URL scheme of in-memory audio objects created by the player UI.
const BLOB_SCHEME: &str = "blob:";

/// Path marker for user-supplied audio uploads. Requests carrying it are
/// never cached or rewritten.
pub const UPLOAD_MARKER: &str = "audio-upload";

/// Whether the service must stay out of the way entirely: no cache lookup,
/// no cache write, the request resolves through the underlying network or
/// local path untouched.
pub fn is_bypass(url: &str) -> bool {
    url.starts_with(BLOB_SCHEME) || path_component(url).contains(UPLOAD_MARKER)
}

/// Canonical request identity used as the cache key.
pub fn request_key(method: &str, url: &str) -> String {
    format!("{} {}", method.to_ascii_uppercase(), url)
}

/// Whether a network response may be stored: plain 200 from our own
/// origin. Opaque, cross-origin, and error responses are returned to the
/// caller unmodified and never cached.
pub fn is_cacheable(status: u16, same_origin: bool) -> bool {
    status == 200 && same_origin
}

/// Path portion of an absolute or relative URL, without query or fragment.
fn path_component(url: &str) -> &str {
    let rest = match url.split_once("://") {
        Some((_, remainder)) => match remainder.find('/') {
            Some(index) => &remainder[index..],
            None => "",
        },
        None => url,
    };
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_urls_bypass() {
        assert!(is_bypass("blob:null/34c2d3e1-99fa-4a2b"));
        assert!(is_bypass("blob:https://player.example/5d1f"));
    }

    #[test]
    fn test_upload_marker_in_path_bypasses() {
        assert!(is_bypass("/api/audio-upload/session-9"));
        assert!(is_bypass("https://player.example/audio-upload?id=4"));
    }

    #[test]
    fn test_upload_marker_in_query_does_not_bypass() {
        assert!(!is_bypass("/search?q=audio-upload"));
        assert!(!is_bypass("https://player.example/page#audio-upload"));
    }

    #[test]
    fn test_static_assets_are_not_bypassed() {
        assert!(!is_bypass("/index.html"));
        assert!(!is_bypass("https://player.example/css/base.css"));
    }

    #[test]
    fn test_request_key_normalizes_method_case() {
        assert_eq!(request_key("get", "/index.html"), "GET /index.html");
        assert_eq!(
            request_key("GET", "/css/base.css"),
            request_key("get", "/css/base.css")
        );
    }

    #[test]
    fn test_only_plain_same_origin_200_is_cacheable() {
        assert!(is_cacheable(200, true));
        assert!(!is_cacheable(200, false));
        assert!(!is_cacheable(404, true));
        assert!(!is_cacheable(304, true));
        assert!(!is_cacheable(500, false));
    }

    #[test]
    fn test_path_component_extraction() {
        assert_eq!(path_component("/a/b?x=1"), "/a/b");
        assert_eq!(path_component("https://h.example/a/b#frag"), "/a/b");
        assert_eq!(path_component("https://h.example"), "");
    }
}
