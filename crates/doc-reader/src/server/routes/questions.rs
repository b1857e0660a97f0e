//! Question endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{AnswerResponse, CrossCheckRequest, CrossCheckResponse, QuestionRequest};

/// POST /documents/:id/question - Ask about one document (text, PDF or image)
pub async fn ask_question(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let start = Instant::now();
    tracing::info!("Question on {}: \"{}\"", id, request.question);

    let response = state.service().ask_single(&id, &request.question).await?;

    tracing::info!("Answered in {}ms", start.elapsed().as_millis());
    Ok(Json(response))
}

/// POST /documents/cross-check - Ask one question across several documents
pub async fn cross_check(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CrossCheckRequest>, JsonRejection>,
) -> Result<Json<CrossCheckResponse>> {
    let Json(request) = payload?;
    let start = Instant::now();
    tracing::info!(
        "Cross-check over {} documents: \"{}\"",
        request.document_ids.len(),
        request.question
    );

    let response = state
        .service()
        .ask_cross_check(&request.document_ids, &request.question)
        .await?;

    tracing::info!("Cross-check answered in {}ms", start.elapsed().as_millis());
    Ok(Json(response))
}
