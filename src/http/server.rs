//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router: control endpoint plus catch-all interception
//! - Wire middleware (timeout, request ID, tracing)
//! - Classify each request and drive store resolution
//! - Hand unresolved requests to the upstream proxy
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Every request is one independent task; the only shared state is the
//!   read-only store behind the resolver and the static tables
//! - No compensating cleanup on cancellation; handlers hold no exclusive
//!   resources
//! - The control endpoint is registered before the wildcard so control
//!   messages never reach the interception path

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::uri::{Authority, Scheme};
use axum::http::{Request, Response, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, post};
use axum::{Json, Router};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{GatewayConfig, MarkerConfig};
use crate::control::{ControlHandle, ControlMessage, VersionChannel};
use crate::http::{proxy, request, response};
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::routing::{classify, EntryResolution, RequestClass, Resolution, Resolver};
use crate::store::AssetStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub markers: MarkerConfig,
    pub client: Client<HttpConnector, Body>,
    pub upstream_scheme: Scheme,
    pub upstream_authority: Authority,
    pub asset_max_age_secs: u64,
    pub control: ControlHandle,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    channel: VersionChannel,
}

impl HttpServer {
    /// Create a new HTTP server over the given asset store.
    pub fn new(config: GatewayConfig, store: Arc<dyn AssetStore>) -> Self {
        let resolver = Arc::new(Resolver::new(store, config.markers.clone()));
        let (channel, control) = VersionChannel::new(config.version.clone());

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(config.timeouts.idle_secs))
            .build(connector);

        let (upstream_scheme, upstream_authority) = upstream_parts(&config.upstream.origin);

        let state = AppState {
            resolver,
            markers: config.markers.clone(),
            client,
            upstream_scheme,
            upstream_authority,
            asset_max_age_secs: config.cache.asset_max_age_secs,
            control,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            channel,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.control.path, post(control_handler))
            .route("/", any(gateway_handler))
            .route("/{*path}", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(request::set_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(request::propagate_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Interception is live from the first accepted connection; clients that
    /// were already talking to a previous instance are taken over at the
    /// socket, with no reload required.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let HttpServer {
            router, channel, ..
        } = self;

        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Gateway accepting requests");

        tokio::spawn(channel.run());

        let app = router.into_make_service();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown trigger received");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

fn upstream_parts(origin: &str) -> (Scheme, Authority) {
    match origin.parse::<Uri>() {
        Ok(uri) => {
            let scheme = uri.scheme().cloned().unwrap_or(Scheme::HTTP);
            let authority = uri
                .authority()
                .cloned()
                .unwrap_or_else(|| Authority::from_static("127.0.0.1:80"));
            (scheme, authority)
        }
        Err(err) => {
            tracing::error!(origin, error = %err, "Invalid upstream origin, falling back to loopback");
            (Scheme::HTTP, Authority::from_static("127.0.0.1:80"))
        }
    }
}

/// Main interception handler: classify, resolve, respond or fall through.
async fn gateway_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().to_string();
    let class = classify(&request, &state.markers);

    tracing::debug!(
        method = %method,
        path = %request.uri().path(),
        class = ?class,
        "Classified request"
    );

    match class {
        RequestClass::NotEligible | RequestClass::BypassBootstrap => {
            let response = proxy::passthrough(&state, request).await;
            metrics::record_request(&method, response.status().as_u16(), "upstream", start);
            response
        }
        RequestClass::VirtualRoot => {
            let (response, source) = match state.resolver.resolve_entry().await {
                EntryResolution::Document(body) => (response::entry_document(body), "store"),
                EntryResolution::Missing => {
                    tracing::warn!("No entry document in store");
                    (response::entry_missing(), "synthetic")
                }
                EntryResolution::StoreFailed(err) => {
                    tracing::error!(error = %err, "Store failure during entry resolution");
                    (response::store_unavailable(), "synthetic")
                }
            };
            metrics::record_request(&method, response.status().as_u16(), source, start);
            response
        }
        RequestClass::Asset(path) => match state.resolver.resolve_asset(&path).await {
            Resolution::Hit { key, body } => {
                tracing::debug!(key = %key, "Served from store");
                let response = response::local_asset(&key, body, state.asset_max_age_secs);
                metrics::record_request(&method, response.status().as_u16(), "store", start);
                response
            }
            Resolution::Miss => {
                let (parts, _body) = request.into_parts();
                let response = proxy::fallback(&state, &parts).await;
                metrics::record_request(&method, response.status().as_u16(), "upstream", start);
                response
            }
        },
        RequestClass::Fallback => {
            let (parts, _body) = request.into_parts();
            let response = proxy::fallback(&state, &parts).await;
            metrics::record_request(&method, response.status().as_u16(), "upstream", start);
            response
        }
    }
}

/// Control endpoint: answers version checks from the host page.
async fn control_handler(
    State(state): State<AppState>,
    Json(message): Json<ControlMessage>,
) -> axum::response::Response {
    match message {
        ControlMessage::CheckVersion => match state.control.check_version().await {
            Ok(reply) => Json(reply).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Control channel unavailable");
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            }
        },
    }
}
