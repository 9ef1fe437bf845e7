//! HTTP surface of the tuner
//!
//! Routes are fixed by the discovery protocol. Every JSON response carries
//! permissive CORS headers since the caller is a separate network appliance.

use anyhow::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub mod handlers;
pub mod middleware;
pub mod responses;

use crate::{
    config::Config,
    device::{BaseUrlResolver, DeviceEmulator},
    errors::AppResult,
    observability::TunerMetrics,
    sources::PlaylistSourceFactory,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub emulator: Arc<DeviceEmulator>,
    pub index_page: bool,
}

impl AppState {
    pub fn new(emulator: DeviceEmulator, index_page: bool) -> Self {
        Self {
            emulator: Arc::new(emulator),
            index_page,
        }
    }

    /// Build the source, resolve the base URL and wire the emulator
    pub fn from_config(config: &Config, metrics: TunerMetrics) -> AppResult<Self> {
        let source = PlaylistSourceFactory::from_config(&config.source)?;
        let resolver = BaseUrlResolver::from_config(&config.web);
        let emulator = DeviceEmulator::new(config, source, resolver.resolve(), metrics);
        Ok(Self::new(emulator, config.web.index_page))
    }
}

/// Build the protocol router around `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/discover.json", get(handlers::discover::discover))
        .route("/lineup.json", get(handlers::lineup::lineup))
        .route("/lineup_status.json", get(handlers::discover::lineup_status))
        .route("/auto/{tuner}", get(handlers::stream::tune))
        .fallback(responses::not_found)
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, state: AppState) -> Result<Self> {
        let addr: SocketAddr = config
            .listen_address()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address {}: {}", config.listen_address(), e))?;

        Ok(Self {
            app: router(state),
            addr,
        })
    }

    /// Serve until cancelled, reporting the bound address once listening
    ///
    /// In-flight requests are allowed to finish.
    pub async fn serve_with_cancellation(
        self,
        ready_signal: tokio::sync::oneshot::Sender<Result<SocketAddr>>,
        cancellation_token: CancellationToken,
    ) -> Result<()> {
        let listener = match tokio::net::TcpListener::bind(&self.addr).await {
            Ok(listener) => listener,
            Err(bind_error) => {
                let bind_err_msg = format!("Failed to bind to {}: {}", self.addr, bind_error);
                let _ = ready_signal.send(Err(anyhow::anyhow!("{}", bind_err_msg)));
                return Err(anyhow::anyhow!("{}", bind_err_msg));
            }
        };

        let local_addr = listener.local_addr()?;
        info!("Tuner listening on {}", local_addr);
        let _ = ready_signal.send(Ok(local_addr));

        let shutdown = async move {
            cancellation_token.cancelled().await;
            info!("Web server received cancellation signal, shutting down gracefully");
        };

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Web server stopped");
        Ok(())
    }
}

/// Resolves on SIGTERM or SIGINT (Ctrl+C on non-unix platforms)
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully");
                    }
                    _ = sigint.recv() => {
                        info!("Received SIGINT (Ctrl+C), shutting down gracefully");
                    }
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to install signal handlers ({}), falling back to Ctrl+C", e);
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
