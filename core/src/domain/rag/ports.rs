use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    rag::entities::{
        AskResult, ContextChunk, GroundedAnswer, IndexedChunk, IngestReport, ReviewVerdict,
        UploadedFile,
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait TextExtractor: Send + Sync {
    /// Plain text of the file; empty when nothing could be extracted.
    fn extract_text(&self, file: UploadedFile) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait Embedder: Send + Sync {
    fn embed(&self, text: String) -> impl Future<Output = Result<Vec<f32>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait VectorIndex: Send + Sync {
    fn upsert(&self, points: Vec<IndexedChunk>) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Nearest chunks within one workspace.
    fn search(
        &self,
        workspace_id: String,
        vector: Vec<f32>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ContextChunk>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait GroundedAnswerer: Send + Sync {
    fn answer(
        &self,
        question: String,
        context: Vec<ContextChunk>,
    ) -> impl Future<Output = Result<GroundedAnswer, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReviewWorkflow: Send + Sync {
    /// `Ok(None)` when no review workflow is configured.
    fn review(
        &self,
        question: String,
        base: GroundedAnswer,
    ) -> impl Future<Output = Result<Option<ReviewVerdict>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait WorkspaceService: Send + Sync {
    fn ingest_files(
        &self,
        workspace_id: String,
        files: Vec<UploadedFile>,
    ) -> impl Future<Output = Result<IngestReport, CoreError>> + Send;

    fn ask(
        &self,
        workspace_id: String,
        question: String,
    ) -> impl Future<Output = Result<AskResult, CoreError>> + Send;
}
