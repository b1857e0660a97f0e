//! Document management endpoints

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::PathRejection,
        Multipart, Path, State,
    },
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{DeleteResponse, DocumentDetail, DocumentListResponse, UploadResponse};

/// Content type assumed when a multipart field declares none
const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// POST /documents - Upload a text file, PDF or image
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_input(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = field
            .content_type()
            .unwrap_or(UNKNOWN_CONTENT_TYPE)
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_input(format!("Failed to read file: {}", e)))?;

        tracing::info!("Processing upload: {} ({}, {} bytes)", filename, content_type, data.len());

        // PDF extraction is CPU-bound; keep it off the async workers.
        let upload_state = state.clone();
        let response = tokio::task::spawn_blocking(move || {
            upload_state
                .service()
                .upload(&data, &filename, &content_type)
        })
        .await
        .map_err(|e| Error::internal(format!("Upload task failed: {}", e)))??;

        return Ok(Json(response));
    }

    Err(Error::invalid_input("Multipart field 'file' is required"))
}

/// GET /documents - List all documents
pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    Json(state.service().list_documents())
}

/// GET /documents/:id - Get a specific document
pub async fn get_document(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<DocumentDetail>> {
    let Path(id) = path?;
    state.service().get_document(&id).map(Json)
}

/// DELETE /documents/:id - Delete a document
pub async fn delete_document(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    let Path(id) = path?;
    Ok(Json(state.service().delete_document(&id)))
}
