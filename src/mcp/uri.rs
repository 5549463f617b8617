//! Resource URI normalization.
//!
//! Hosts append cache-busting query strings and trailing slashes to widget
//! URIs, so lookups compare `origin + path` only.

use url::{Origin, Url};

/// Normalizes a resource URI for comparison.
///
/// Parsed URIs reduce to origin plus path with one trailing slash removed (an
/// empty path becomes `/`). Unparseable input falls back to the raw string
/// with one trailing slash removed.
pub fn normalize_resource_uri(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(url) => {
            let origin = origin_of(&url);
            let path = url.path();
            let path = path.strip_suffix('/').unwrap_or(path);
            let path = if path.is_empty() { "/" } else { path };
            format!("{origin}{path}")
        }
        Err(_) => uri.strip_suffix('/').unwrap_or(uri).to_string(),
    }
}

/// Returns `true` when both URIs name the same resource.
pub fn same_resource(requested: &str, known: &str) -> bool {
    normalize_resource_uri(requested) == normalize_resource_uri(known)
}

fn origin_of(url: &Url) -> String {
    match url.origin() {
        tuple @ Origin::Tuple(..) => tuple.ascii_serialization(),
        // Custom schemes such as `ui://` have opaque origins; keep the
        // authority so distinct hosts stay distinct.
        Origin::Opaque(_) => {
            let mut origin = format!("{}://", url.scheme());
            if let Some(host) = url.host_str() {
                origin.push_str(host);
            }
            if let Some(port) = url.port() {
                origin.push_str(&format!(":{port}"));
            }
            origin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_strings_are_ignored() {
        assert_eq!(
            normalize_resource_uri("https://a.com/x?v=1"),
            normalize_resource_uri("https://a.com/x")
        );
    }

    #[test]
    fn trailing_slash_is_stripped_once() {
        assert_eq!(normalize_resource_uri("https://a.com/x/"), "https://a.com/x");
        assert_eq!(normalize_resource_uri("https://a.com/x"), "https://a.com/x");
    }

    #[test]
    fn empty_path_becomes_root() {
        assert_eq!(normalize_resource_uri("https://a.com"), "https://a.com/");
        assert_eq!(normalize_resource_uri("https://a.com/"), "https://a.com/");
    }

    #[test]
    fn default_port_and_host_case_are_canonical() {
        assert_eq!(
            normalize_resource_uri("HTTPS://A.com:443/widget/"),
            "https://a.com/widget"
        );
        assert_eq!(
            normalize_resource_uri("http://localhost:4444/w"),
            "http://localhost:4444/w"
        );
    }

    #[test]
    fn custom_scheme_keeps_its_host() {
        assert_eq!(
            normalize_resource_uri("ui://widget/greeting.html?v=3"),
            "ui://widget/greeting.html"
        );
        assert!(!same_resource("ui://widget/a.html", "ui://other/a.html"));
    }

    #[test]
    fn unparseable_input_falls_back_to_raw_string() {
        assert_eq!(normalize_resource_uri("widget/greeting/"), "widget/greeting");
        assert_eq!(normalize_resource_uri("not a uri"), "not a uri");
    }

    #[test]
    fn fragments_do_not_matter() {
        assert!(same_resource(
            "https://w.example/app/#top",
            "https://w.example/app"
        ));
    }
}
