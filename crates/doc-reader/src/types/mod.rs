//! Core types for the document Q&A service

pub mod document;
pub mod request;
pub mod response;

pub use document::{
    Document, DocumentContent, DocumentDetail, DocumentKind, DocumentSummary, NewDocument,
};
pub use request::{CrossCheckRequest, QuestionRequest};
pub use response::{
    AnswerResponse, CrossCheckResponse, DeleteResponse, DocumentListResponse, UploadResponse,
};
