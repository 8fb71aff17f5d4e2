//! Local response construction.
//!
//! # Responsibilities
//! - Build responses for store hits, the entry document, and the fixed
//!   diagnostic cases
//! - Attach content type, caching directive, and isolation headers
//!
//! # Design Decisions
//! - The entry document is never cacheable; a stale entry after the
//!   installer updates the store would pin old asset references
//! - Stored assets get a bounded public max-age; they rarely mutate within
//!   a session
//! - Every locally built response carries both isolation headers, the
//!   diagnostic ones included

use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use bytes::Bytes;

use crate::http::content_type;
use crate::security::headers;

/// Cache directive for the entry document.
pub const ENTRY_CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

const MISSING_ENTRY_BODY: &str = "<h2 style=\"color:white; font-family:sans-serif; \
     text-align:center; margin-top:50px;\">Application entry document not found. \
     Re-install the app bundle and try again.</h2>";

const STORE_UNAVAILABLE_BODY: &str = "Error reading the asset store.";

/// 200 response for a stored asset.
pub fn local_asset(key: &str, body: Bytes, max_age_secs: u64) -> Response<Body> {
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type::for_key(key))
        .header(header::CACHE_CONTROL, format!("public, max-age={max_age_secs}"))
        .body(Body::from(body))
        .unwrap();
    headers::apply_isolation(response.headers_mut());
    response
}

/// 200 response for the bundle's entry document.
pub fn entry_document(body: Bytes) -> Response<Body> {
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html")
        .header(header::CACHE_CONTROL, ENTRY_CACHE_CONTROL)
        .body(Body::from(body))
        .unwrap();
    headers::apply_isolation(response.headers_mut());
    response
}

/// Fixed 404 shown when the store holds no entry document.
pub fn entry_missing() -> Response<Body> {
    let mut response = Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/html")
        .body(Body::from(MISSING_ENTRY_BODY))
        .unwrap();
    headers::apply_isolation(response.headers_mut());
    response
}

/// Fixed 500 shown when the store itself cannot be read.
pub fn store_unavailable() -> Response<Body> {
    let mut response = Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(STORE_UNAVAILABLE_BODY))
        .unwrap();
    headers::apply_isolation(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::headers::{EMBEDDER_POLICY, OPENER_POLICY};

    #[test]
    fn asset_response_derives_content_type_from_key() {
        let response = local_asset("_framework/dotnet.wasm", Bytes::from("x"), 3600);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/wasm");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
    }

    #[test]
    fn entry_document_is_never_cacheable() {
        let response = entry_document(Bytes::from("<html>"));
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
        assert_eq!(response.headers()[header::CACHE_CONTROL], ENTRY_CACHE_CONTROL);
    }

    #[test]
    fn diagnostics_have_fixed_statuses() {
        assert_eq!(entry_missing().status(), StatusCode::NOT_FOUND);
        assert_eq!(entry_missing().headers()[header::CONTENT_TYPE], "text/html");
        assert_eq!(store_unavailable().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn every_local_response_is_isolated() {
        let responses = [
            local_asset("a.js", Bytes::from("x"), 60),
            entry_document(Bytes::from("<html>")),
            entry_missing(),
            store_unavailable(),
        ];
        for response in responses {
            assert_eq!(response.headers()[EMBEDDER_POLICY.0], EMBEDDER_POLICY.1);
            assert_eq!(response.headers()[OPENER_POLICY.0], OPENER_POLICY.1);
        }
    }
}
