//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, access time)
//! - Bind server to listener, plain or TLS
//! - Drain in-flight requests on shutdown

use axum::{
    body::Body,
    extract::FromRef,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::AccessAuthorizer;
use crate::config::{GuardConfig, TlsConfig};
use crate::http::handlers;
use crate::http::middleware::access_time_middleware;
use crate::http::request::{RequestIdMaker, X_REQUEST_ID};
use crate::net::tls::load_tls_config;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub authorizer: AccessAuthorizer,
}

impl FromRef<AppState> for AccessAuthorizer {
    fn from_ref(state: &AppState) -> Self {
        state.authorizer.clone()
    }
}

/// HTTP server fronting the access-time protected API.
pub struct HttpServer {
    router: Router,
    config: GuardConfig,
}

impl HttpServer {
    pub fn new(config: GuardConfig, authorizer: AccessAuthorizer) -> Self {
        let state = AppState { authorizer };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GuardConfig, state: AppState) -> Router {
        let protected = Router::new()
            .route("/api/v1/access", get(handlers::get_access))
            .route_layer(middleware::from_fn_with_state(
                state.authorizer.clone(),
                access_time_middleware,
            ));

        Router::new()
            .route("/health", get(handlers::health))
            .merge(protected)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let request_id = req
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(RequestIdMaker))
    }

    /// The fully layered router, for embedding or testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    ///
    /// In-flight requests get `timeouts.shutdown_secs` to finish once the
    /// signal arrives; whatever is still running after that is abandoned.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.timeouts.shutdown_secs);
        tracing::info!(address = %addr, "HTTP server starting");

        let (draining_tx, mut draining_rx) = watch::channel(false);
        let serve = axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
                let _ = draining_tx.send(true);
            })
            .into_future();

        let deadline = async move {
            let _ = draining_rx.wait_for(|draining| *draining).await;
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = serve => result?,
            _ = deadline => {
                tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Shutdown grace period elapsed, abandoning in-flight requests"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: &TlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let rustls = load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
        let grace = Duration::from_secs(self.config.timeouts.shutdown_secs);

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received, draining connections");
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::sync::Notify;

    use crate::auth::{AccessTimeReader, AuthorizationPolicy, LookupError};
    use crate::blockchain::Wallet;
    use crate::http::request::{MESSAGE_HEADER, SIGNATURE_HEADER};
    use crate::lifecycle::Shutdown;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    /// A chain read that never completes.
    struct StuckReader {
        entered: Arc<Notify>,
    }

    #[async_trait]
    impl AccessTimeReader for StuckReader {
        async fn access_time(&self, _address: Address) -> Result<u64, LookupError> {
            self.entered.notify_one();
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_shutdown_abandons_requests_after_grace_period() {
        let entered = Arc::new(Notify::new());
        let reader = Arc::new(StuckReader { entered: entered.clone() });
        let authorizer = AccessAuthorizer::new(reader, AuthorizationPolicy::default());

        let mut config = GuardConfig::default();
        config.timeouts.request_secs = 30;
        config.timeouts.shutdown_secs = 1;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Shutdown::new();
        let server = tokio::spawn(HttpServer::new(config, authorizer).run(listener, shutdown.subscribe()));

        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 31337).unwrap();
        let message = "accesstime login 1700000000";
        let signature = wallet.sign_message_hex(message).await.unwrap();
        let _in_flight = tokio::spawn(
            reqwest::Client::new()
                .get(format!("http://{}/api/v1/access", addr))
                .header(SIGNATURE_HEADER, signature)
                .header(MESSAGE_HEADER, message)
                .send(),
        );
        tokio::time::timeout(Duration::from_secs(5), entered.notified())
            .await
            .unwrap();

        shutdown.trigger();
        let triggered = Instant::now();
        let result = tokio::time::timeout(Duration::from_secs(5), server).await;

        assert!(result.unwrap().unwrap().is_ok());
        assert!(triggered.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_idle_server_stops_promptly() {
        let authorizer = AccessAuthorizer::new(
            Arc::new(StuckReader { entered: Arc::new(Notify::new()) }),
            AuthorizationPolicy::default(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let shutdown = Shutdown::new();
        let server = tokio::spawn(
            HttpServer::new(GuardConfig::default(), authorizer).run(listener, shutdown.subscribe()),
        );

        shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(2), server).await;
        assert!(result.unwrap().unwrap().is_ok());
    }
}
