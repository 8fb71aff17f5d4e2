//! Request classification.
//!
//! # Responsibilities
//! - Decide whether a request is eligible for store resolution
//! - Detect the gateway's own bootstrap artifact (bypass)
//! - Detect the virtual-root marker
//! - Send everything else down the network path
//!
//! # Design Decisions
//! - Only GET over http(s) is classified at all
//! - Classification looks at the final segment of the percent-decoded path
//! - The bootstrap artifact is never served from the store (fetch-loop guard)
//! - The host page and directory-style paths skip the store but keep the
//!   isolation-header rewrite on the way back

use axum::body::Body;
use axum::http::{Method, Request};
use percent_encoding::percent_decode_str;

use crate::config::MarkerConfig;

/// Outcome of classifying one incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestClass {
    /// Non-GET or non-http scheme; forwarded verbatim, headers untouched.
    NotEligible,

    /// The gateway's own bootstrap artifact; fetched upstream directly so a
    /// lookup can never loop back into the gateway.
    BypassBootstrap,

    /// The virtual-root marker; resolves to the bundle's entry document.
    VirtualRoot,

    /// Candidate for store resolution, carrying the decoded full path.
    Asset(String),

    /// No local resolution applies; upstream fetch with header rewrite.
    Fallback,
}

/// Classify a request against the configured path markers.
pub fn classify(request: &Request<Body>, markers: &MarkerConfig) -> RequestClass {
    if request.method() != Method::GET {
        return RequestClass::NotEligible;
    }
    if let Some(scheme) = request.uri().scheme_str() {
        if scheme != "http" && scheme != "https" {
            return RequestClass::NotEligible;
        }
    }

    let path = percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned();
    let segment = final_segment(&path);

    if segment == markers.bootstrap {
        return RequestClass::BypassBootstrap;
    }
    if segment == markers.virtual_root {
        return RequestClass::VirtualRoot;
    }
    if segment.is_empty() || segment == markers.host_page {
        return RequestClass::Fallback;
    }
    RequestClass::Asset(path)
}

fn final_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn markers() -> MarkerConfig {
        MarkerConfig::default()
    }

    #[test]
    fn non_get_is_not_eligible() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            let req = request(method.clone(), "/app.js");
            assert_eq!(classify(&req, &markers()), RequestClass::NotEligible, "{method}");
        }
    }

    #[test]
    fn non_network_scheme_is_not_eligible() {
        let req = request(Method::GET, "ftp://host/file.js");
        assert_eq!(classify(&req, &markers()), RequestClass::NotEligible);
    }

    #[test]
    fn bootstrap_artifact_bypasses_at_any_depth() {
        let req = request(Method::GET, "/sw.js");
        assert_eq!(classify(&req, &markers()), RequestClass::BypassBootstrap);
        let req = request(Method::GET, "/nested/dir/sw.js");
        assert_eq!(classify(&req, &markers()), RequestClass::BypassBootstrap);
    }

    #[test]
    fn virtual_root_marker_detected() {
        let req = request(Method::GET, "/virtual-app.html");
        assert_eq!(classify(&req, &markers()), RequestClass::VirtualRoot);
    }

    #[test]
    fn root_and_directory_paths_fall_through() {
        let req = request(Method::GET, "/");
        assert_eq!(classify(&req, &markers()), RequestClass::Fallback);
        let req = request(Method::GET, "/assets/");
        assert_eq!(classify(&req, &markers()), RequestClass::Fallback);
    }

    #[test]
    fn host_page_falls_through() {
        let req = request(Method::GET, "/index.html");
        assert_eq!(classify(&req, &markers()), RequestClass::Fallback);
    }

    #[test]
    fn asset_candidate_carries_decoded_path() {
        let req = request(Method::GET, "/my%20dir/file%20name.png");
        assert_eq!(
            classify(&req, &markers()),
            RequestClass::Asset("/my dir/file name.png".to_string())
        );
    }

    #[test]
    fn absolute_form_http_uri_is_eligible() {
        let req = request(Method::GET, "https://site.example/js/app.js");
        assert_eq!(
            classify(&req, &markers()),
            RequestClass::Asset("/js/app.js".to_string())
        );
    }
}
