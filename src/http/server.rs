//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the single catch-all dispatch handler
//! - Wire up middleware (timeout, tracing, request ID, CORS decoration)
//! - Serve plain HTTP (tests, --no-tls) or terminate TLS via axum-server
//! - Classify each request once and hand it to the forwarder or the static
//!   file responder

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::EdgeConfig;
use crate::http::middleware::{cross_origin_headers, request_id};
use crate::proxy::{classify, RelayError, RouteClass, UpstreamForwarder};

/// Upper bound on a token-exchange body; OAuth form bodies are tiny.
const TOKEN_BODY_LIMIT: usize = 1024 * 1024;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<UpstreamForwarder>,
    pub static_root: PathBuf,
}

/// Edge server: TLS termination, static files, and the OAuth proxy routes.
pub struct EdgeServer {
    router: Router,
    config: EdgeConfig,
}

impl EdgeServer {
    /// Create a new edge server from a validated configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, reqwest::Error> {
        let forwarder = Arc::new(UpstreamForwarder::new(&config.upstream, &config.timeouts)?);
        let state = AppState {
            forwarder,
            static_root: config.static_files.root.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// CORS decoration is the outermost layer: no route, and no inner layer
    /// response such as a timeout, can reach the client undecorated.
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id))
            .layer(middleware::from_fn(cross_origin_headers))
    }

    /// Router for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Serve plain HTTP on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Terminate TLS on the given address with the provided rustls context.
    pub async fn run_tls(self, addr: SocketAddr, tls: RustlsConfig) -> Result<(), std::io::Error> {
        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(5)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Classify the request and dispatch it exactly once.
async fn dispatch_handler(State(state): State<AppState>, request: Request) -> Response {
    let class = classify(request.method(), request.uri().path());
    tracing::debug!(
        method = %request.method(),
        path = request.uri().path(),
        class = ?class,
        "Dispatching request"
    );

    match class {
        RouteClass::ResourceFetch => resource_response(&state, request).await,
        RouteClass::TokenExchange => token_response(&state, request).await,
        RouteClass::StaticAsset => static_response(&state, request).await,
        RouteClass::Unmatched => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Proxied resource fetch: requires an Authorization header, which is the
/// only inbound header forwarded upstream.
async fn resource_response(state: &AppState, request: Request) -> Response {
    // Take the Request by value (owned `Request<Body>` is `Send`, unlike a
    // borrow of the non-Sync request) so the handler future stays `Send`.
    match request.headers().get(header::AUTHORIZATION).cloned() {
        Some(authorization) => state.forwarder.resource_fetch(&authorization).await,
        None => RelayError::MissingAuthorization.into_response(),
    }
}

/// Proxied token exchange: the inbound body is read in full, bounded, and
/// forwarded verbatim. A body shorter than its declared content-length
/// surfaces as a read error and aborts the request.
async fn token_response(state: &AppState, request: Request) -> Response {
    match axum::body::to_bytes(request.into_body(), TOKEN_BODY_LIMIT).await {
        Ok(body) => state.forwarder.token_exchange(body).await,
        Err(e) => RelayError::BodyRead(e.to_string()).into_response(),
    }
}

/// Delegate to the static file responder for everything that is not a proxy
/// route.
async fn static_response(state: &AppState, request: Request) -> Response {
    match ServeDir::new(&state.static_root).oneshot(request).await {
        Ok(response) => response.map(Body::new).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Static file service failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
