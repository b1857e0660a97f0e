//! API routes

pub mod documents;
pub mod questions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all document and question routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Document management - with a body limit sized for uploads
        .route(
            "/documents",
            get(documents::list_documents)
                .post(documents::upload_document)
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route(
            "/documents/:id",
            get(documents::get_document).delete(documents::delete_document),
        )
        // Questions
        .route("/documents/:id/question", post(questions::ask_question))
        .route("/documents/cross-check", post(questions::cross_check))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "doc-reader",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Upload documents and images, ask questions, and cross-check multiple files",
        "endpoints": {
            "POST /documents": "Upload a text file, PDF or image (multipart field 'file')",
            "GET /documents": "List all documents",
            "GET /documents/:id": "Get document details",
            "DELETE /documents/:id": "Delete a document",
            "POST /documents/:id/question": "Ask a question about one document",
            "POST /documents/cross-check": "Ask one question across 2-5 documents",
            "GET /health": "Liveness check",
            "GET /ready": "Reasoning backend readiness"
        },
        "supported_types": crate::ingestion::ContentAdapter::accepted_types(),
    }))
}
