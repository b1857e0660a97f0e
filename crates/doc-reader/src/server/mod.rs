//! HTTP server for the document Q&A service

pub mod routes;
pub mod state;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::Redirect,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::DocReaderConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Document Q&A HTTP server
pub struct DocReaderServer {
    config: DocReaderConfig,
    state: AppState,
}

impl DocReaderServer {
    /// Create a new server
    pub fn new(config: DocReaderConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Start the server and run until Ctrl+C
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = build_router(self.state)?;

        tracing::info!("Starting document Q&A server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config().server.cors_origins)?;
    let max_upload_size = state.config().server.max_upload_size;

    Ok(Router::new()
        .route("/", get(|| async { Redirect::temporary("/info") }))
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        .merge(routes::api_routes(max_upload_size))
        .with_state(state)
        // Middleware layers (order matters - applied bottom to top)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| Error::Config(format!("Invalid CORS origin '{}': {}", origin, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check endpoint
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
