//! Application state for the HTTP server

use std::sync::Arc;

use crate::config::DocReaderConfig;
use crate::error::Result;
use crate::ingestion::ContentAdapter;
use crate::providers::build_backend;
use crate::service::DocumentService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: DocReaderConfig,
    /// Registry, adapter and orchestrator
    service: DocumentService,
}

impl AppState {
    /// Create application state with the backend selected in configuration
    pub fn new(config: DocReaderConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let backend = build_backend(&config)?;
        let service = DocumentService::new(ContentAdapter::default(), backend);

        Ok(Self::with_service(config, service))
    }

    /// Create application state around an existing service
    pub fn with_service(config: DocReaderConfig, service: DocumentService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, service }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &DocReaderConfig {
        &self.inner.config
    }

    /// Get the document service
    pub fn service(&self) -> &DocumentService {
        &self.inner.service
    }

    /// Ready when the reasoning backend is configured and reachable
    pub async fn is_ready(&self) -> bool {
        self.service()
            .backend()
            .health_check()
            .await
            .unwrap_or(false)
    }
}
