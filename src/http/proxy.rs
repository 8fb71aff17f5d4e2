//! Upstream fetch and isolation-header rewriting.
//!
//! # Responsibilities
//! - Forward requests to the configured upstream origin
//! - Force isolation headers onto rewriteable fallback responses
//! - Pass opaque exchanges through untouched
//! - Retry a failed fallback fetch once, as a plain passthrough
//!
//! # Design Decisions
//! - Informational/upgrade exchanges are never rewritten; mutating their
//!   headers corrupts the handshake
//! - The retry response is returned unrewritten, whatever it is
//! - A second transport failure surfaces as 502

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderValue, Request, Response, StatusCode, Uri};
use hyper::body::Incoming;
use hyper_util::client::legacy::Error as ClientError;

use crate::http::server::AppState;
use crate::security::headers;

/// Exchanges whose headers are not the gateway's to rewrite.
pub fn is_opaque(status: StatusCode) -> bool {
    status.is_informational()
}

/// Force isolation headers onto a rewriteable response; leave opaque
/// exchanges untouched. Status, reason, and body pass through either way.
pub fn rewrite_response(response: Response<Body>) -> Response<Body> {
    if is_opaque(response.status()) {
        return response;
    }
    let (mut parts, body) = response.into_parts();
    headers::apply_isolation(&mut parts.headers);
    Response::from_parts(parts, body)
}

/// Forward a request verbatim: no header rewriting, no retry. Used for
/// non-eligible requests and the bootstrap-artifact bypass.
pub async fn passthrough(state: &AppState, request: Request<Body>) -> Response<Body> {
    let (parts, body) = request.into_parts();
    match send(state, &parts, body).await {
        Ok(response) => response.map(Body::new),
        Err(err) => {
            tracing::error!(path = %parts.uri.path(), error = %err, "Upstream request failed");
            bad_gateway()
        }
    }
}

/// Fallback fetch for GET requests with no local resolution. Rewrites the
/// response headers unless the exchange is opaque; on transport failure,
/// re-issues the request once and returns that result unrewritten.
pub async fn fallback(state: &AppState, parts: &Parts) -> Response<Body> {
    match send(state, parts, Body::empty()).await {
        Ok(response) => rewrite_response(response.map(Body::new)),
        Err(err) => {
            tracing::warn!(path = %parts.uri.path(), error = %err, "Upstream fetch failed, retrying as plain passthrough");
            match send(state, parts, Body::empty()).await {
                Ok(response) => response.map(Body::new),
                Err(err) => {
                    tracing::error!(path = %parts.uri.path(), error = %err, "Upstream retry failed");
                    bad_gateway()
                }
            }
        }
    }
}

async fn send(state: &AppState, parts: &Parts, body: Body) -> Result<Response<Incoming>, ClientError> {
    let mut request = Request::new(body);
    *request.method_mut() = parts.method.clone();
    *request.uri_mut() = upstream_uri(state, &parts.uri);
    *request.headers_mut() = parts.headers.clone();
    state.client.request(request).await
}

/// Re-target a request URI at the upstream origin, keeping path and query.
fn upstream_uri(state: &AppState, uri: &Uri) -> Uri {
    let mut uri_parts = uri.clone().into_parts();
    uri_parts.scheme = Some(state.upstream_scheme.clone());
    uri_parts.authority = Some(state.upstream_authority.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    Uri::from_parts(uri_parts).unwrap_or_else(|_| uri.clone())
}

fn bad_gateway() -> Response<Body> {
    let mut response = Response::new(Body::from("Upstream request failed"));
    *response.status_mut() = StatusCode::BAD_GATEWAY;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}
