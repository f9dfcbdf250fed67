//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use converter_types::{ConversionRepository, RateProvider};

use super::handlers::{self, AppState};
use crate::ConversionService;

/// HTTP Server for the Currency Converter API.
pub struct HttpServer<R: ConversionRepository, P: RateProvider> {
    state: Arc<AppState<R, P>>,
}

impl<R: ConversionRepository, P: RateProvider> HttpServer<R, P> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ConversionService<R, P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/currencies", get(handlers::list_currencies::<R, P>))
            .route("/convert", post(handlers::convert::<R, P>))
            .route("/history", get(handlers::history::<R, P>))
            .route("/conversions", get(handlers::list_conversions::<R, P>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .fallback(handlers::not_found)
            .layer(metrics)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener until a shutdown signal arrives.
    pub async fn serve(self, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
