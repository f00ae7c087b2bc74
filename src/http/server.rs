//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (tracing, request timeout)
//! - Fetch the upstream page for the incoming path
//! - Run the rewrite pipeline over the parsed document
//! - Serialize and return the rewritten markup

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use kuchiki::traits::TendrilSink;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::assets::AssetStore;
use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::client::UpstreamClient;
use crate::rewrite;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub store: AssetStore,
}

/// HTTP server for the content-rewriting proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let client = UpstreamClient::new(config.upstream.origin.clone(), &config.timeouts)?;
        let store = AssetStore::new(&config.assets.root);

        let state = AppState { client, store };
        let router = Self::build_router(&config, state);

        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = %self.config.upstream.origin,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
/// Fetches the origin page for the request path, rewrites it, and returns it.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    tracing::debug!(
        method = %request.method(),
        path = %path_and_query,
        "Proxying request"
    );

    let content = match state.client.fetch_page(&path_and_query).await {
        Ok(content) => content,
        Err(err) => {
            tracing::error!(path = %path_and_query, error = %err, "Upstream fetch failed");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    // Empty upstream body short-circuits to an empty response.
    if content.trim().is_empty() {
        return html_response(String::new());
    }

    // kuchiki's NodeRef is not Send, so the parse/rewrite/serialize span runs
    // on a blocking thread; the pipeline's awaits are driven via the handle.
    let handle = tokio::runtime::Handle::current();
    let markup = tokio::task::spawn_blocking(move || {
        let document = kuchiki::parse_html().one(content.as_str());
        handle.block_on(rewrite::run_pipeline(&document, &state.client, &state.store));

        match document.select_first("html") {
            Ok(root) => root.as_node().to_string(),
            // A parse always yields an html element; fall back to the whole tree.
            Err(()) => document.to_string(),
        }
    })
    .await
    .expect("rewrite task failed");

    html_response(format!("<!DOCTYPE html>{}", markup))
}

fn html_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
