//! Cross-origin isolation headers.
//!
//! # Responsibilities
//! - Define the two headers required for cross-origin-isolated execution
//!   (SharedArrayBuffer-class features in WebAssembly runtimes)
//! - Force them onto responses, overwriting whatever an origin returned
//!
//! # Design Decisions
//! - `insert` semantics, not `append`: a conflicting origin value must lose
//! - Callers decide *whether* to rewrite (opaque exchanges are exempt);
//!   this module only knows *how*

use axum::http::header::{HeaderMap, HeaderName, HeaderValue};

/// `Cross-Origin-Embedder-Policy` name and required value.
pub const EMBEDDER_POLICY: (&str, &str) = ("cross-origin-embedder-policy", "require-corp");

/// `Cross-Origin-Opener-Policy` name and required value.
pub const OPENER_POLICY: (&str, &str) = ("cross-origin-opener-policy", "same-origin");

/// Force both isolation headers onto `headers`.
pub fn apply_isolation(headers: &mut HeaderMap) {
    headers.insert(
        HeaderName::from_static(EMBEDDER_POLICY.0),
        HeaderValue::from_static(EMBEDDER_POLICY.1),
    );
    headers.insert(
        HeaderName::from_static(OPENER_POLICY.0),
        HeaderValue::from_static(OPENER_POLICY.1),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_when_absent() {
        let mut headers = HeaderMap::new();
        apply_isolation(&mut headers);
        assert_eq!(headers[EMBEDDER_POLICY.0], EMBEDDER_POLICY.1);
        assert_eq!(headers[OPENER_POLICY.0], OPENER_POLICY.1);
    }

    #[test]
    fn overwrites_conflicting_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(EMBEDDER_POLICY.0),
            HeaderValue::from_static("unsafe-none"),
        );
        headers.insert(
            HeaderName::from_static(OPENER_POLICY.0),
            HeaderValue::from_static("unsafe-none"),
        );
        apply_isolation(&mut headers);
        assert_eq!(headers[EMBEDDER_POLICY.0], "require-corp");
        assert_eq!(headers[OPENER_POLICY.0], "same-origin");
        assert_eq!(headers.get_all(EMBEDDER_POLICY.0).iter().count(), 1);
    }
}
