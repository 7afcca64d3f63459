use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    rag::{
        chunking::chunk_document,
        entities::{
            AskResult, Citation, ContextChunk, DocumentChunk, GroundedAnswer, IndexedChunk,
            IngestReport, RagResult, ReviewVerdict, UploadedFile,
        },
        ports::{Embedder, GroundedAnswerer, ReviewWorkflow, TextExtractor, VectorIndex, WorkspaceService},
        prompt::REFUSAL_ANSWER,
    },
};

const EMBED_CONCURRENCY: usize = 4;

/// Stable point id for a chunk, so re-uploading a file overwrites its points.
pub fn point_id(workspace_id: &str, source: &str, chunk_index: u32) -> Uuid {
    let digest = Sha256::digest(format!("{}|{}|{}", workspace_id, source, chunk_index).as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

/// Clamps confidence to `[0, 1]` and keeps only citations of retrieved
/// chunks, without repeats.
pub fn sanitize_answer(answer: GroundedAnswer, context: &[ContextChunk]) -> GroundedAnswer {
    GroundedAnswer {
        confidence: clamp_confidence(answer.confidence),
        citations: retain_known_citations(answer.citations, context),
        answer: answer.answer,
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

fn retain_known_citations(citations: Vec<Citation>, context: &[ContextChunk]) -> Vec<Citation> {
    let mut kept: Vec<Citation> = Vec::new();
    for citation in citations {
        if context.iter().any(|chunk| citation.refers_to(chunk)) && !kept.contains(&citation) {
            kept.push(citation);
        }
    }
    kept
}

/// Applies review overrides on top of the base answer. Empty overrides
/// keep the base values.
pub fn finalize_answer(
    base: GroundedAnswer,
    verdict: Option<ReviewVerdict>,
    context: &[ContextChunk],
) -> RagResult {
    let Some(verdict) = verdict else {
        return RagResult {
            answer: base.answer,
            confidence: base.confidence,
            citations: base.citations,
            needs_human_review: false,
            review_comment: String::new(),
        };
    };

    let review_comment = verdict.comment();
    let answer = verdict
        .approved_answer
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(base.answer);
    let citations = verdict
        .citations
        .filter(|c| !c.is_empty())
        .map(|c| retain_known_citations(c, context))
        .unwrap_or(base.citations);

    RagResult {
        answer,
        confidence: verdict.confidence.map(clamp_confidence).unwrap_or(base.confidence),
        citations,
        needs_human_review: verdict.needs_human_review,
        review_comment,
    }
}

/// Document ingestion and grounded question answering for workspaces.
pub struct WorkspaceRagService<EX, EM, VI, AN, RV>
where
    EX: TextExtractor,
    EM: Embedder,
    VI: VectorIndex,
    AN: GroundedAnswerer,
    RV: ReviewWorkflow,
{
    extractor: Arc<EX>,
    embedder: Arc<EM>,
    index: Arc<VI>,
    answerer: Arc<AN>,
    reviewer: Arc<RV>,
    top_k: usize,
    max_chunk_chars: usize,
}

impl<EX, EM, VI, AN, RV> WorkspaceRagService<EX, EM, VI, AN, RV>
where
    EX: TextExtractor,
    EM: Embedder,
    VI: VectorIndex,
    AN: GroundedAnswerer,
    RV: ReviewWorkflow,
{
    pub fn new(
        extractor: Arc<EX>,
        embedder: Arc<EM>,
        index: Arc<VI>,
        answerer: Arc<AN>,
        reviewer: Arc<RV>,
        top_k: usize,
        max_chunk_chars: usize,
    ) -> Self {
        Self {
            extractor,
            embedder,
            index,
            answerer,
            reviewer,
            top_k: top_k.max(1),
            max_chunk_chars,
        }
    }

    async fn embed_chunks(
        &self,
        workspace_id: &str,
        chunks: Vec<DocumentChunk>,
    ) -> Result<Vec<IndexedChunk>, CoreError> {
        let embedder = &self.embedder;

        stream::iter(chunks)
            .map(|chunk| async move {
                let vector = embedder.embed(chunk.text.clone()).await?;
                if vector.is_empty() {
                    return Err(CoreError::ExternalServiceError(
                        "embedding service returned an empty vector".to_string(),
                    ));
                }

                Ok(IndexedChunk {
                    id: point_id(workspace_id, &chunk.source, chunk.chunk_index),
                    workspace_id: workspace_id.to_string(),
                    chunk,
                    vector,
                })
            })
            .buffered(EMBED_CONCURRENCY)
            .try_collect()
            .await
    }
}

impl<EX, EM, VI, AN, RV> WorkspaceService for WorkspaceRagService<EX, EM, VI, AN, RV>
where
    EX: TextExtractor,
    EM: Embedder,
    VI: VectorIndex,
    AN: GroundedAnswerer,
    RV: ReviewWorkflow,
{
    #[instrument(skip(self, files), fields(files = files.len()))]
    async fn ingest_files(
        &self,
        workspace_id: String,
        files: Vec<UploadedFile>,
    ) -> Result<IngestReport, CoreError> {
        if files.is_empty() {
            return Err(CoreError::InvalidInput(
                "At least one file must be provided.".to_string(),
            ));
        }

        let mut chunks_indexed = 0;
        for file in files {
            let filename = file.filename.clone();
            let text = self.extractor.extract_text(file).await?;
            if text.trim().is_empty() {
                info!(filename, "no extractable text, skipping file");
                continue;
            }

            let chunks = chunk_document(&filename, &text, self.max_chunk_chars);
            let points = self.embed_chunks(&workspace_id, chunks).await?;
            let count = points.len();

            self.index.upsert(points).await?;
            info!(filename, chunks = count, "indexed file");
            chunks_indexed += count;
        }

        Ok(IngestReport {
            workspace_id,
            chunks_indexed,
        })
    }

    #[instrument(skip(self, question))]
    async fn ask(&self, workspace_id: String, question: String) -> Result<AskResult, CoreError> {
        let question = question.trim().to_string();
        if question.is_empty() {
            return Err(CoreError::InvalidInput("Question is required.".to_string()));
        }

        let vector = self.embedder.embed(question.clone()).await?;
        let context = self
            .index
            .search(workspace_id.clone(), vector, self.top_k)
            .await?;

        let base = if context.is_empty() {
            info!("no context retrieved, refusing");
            GroundedAnswer {
                answer: REFUSAL_ANSWER.to_string(),
                confidence: 0.0,
                citations: Vec::new(),
            }
        } else {
            let answer = self
                .answerer
                .answer(question.clone(), context.clone())
                .await?;
            sanitize_answer(answer, &context)
        };

        let verdict = match self.reviewer.review(question.clone(), base.clone()).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(error = %e, "review workflow unavailable, returning base answer");
                None
            }
        };

        Ok(AskResult {
            rag_result: finalize_answer(base, verdict, &context),
            workspace_id,
            question,
            context_chunks: context,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use bytes::Bytes;

    use super::*;

    #[derive(Default)]
    struct FakeExtractor {
        texts: HashMap<String, String>,
    }

    impl TextExtractor for FakeExtractor {
        async fn extract_text(&self, file: UploadedFile) -> Result<String, CoreError> {
            Ok(self.texts.get(&file.filename).cloned().unwrap_or_default())
        }
    }

    struct FakeEmbedder;

    impl Embedder for FakeEmbedder {
        async fn embed(&self, text: String) -> Result<Vec<f32>, CoreError> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[derive(Default)]
    struct InMemoryIndex {
        points: Mutex<Vec<IndexedChunk>>,
    }

    impl VectorIndex for InMemoryIndex {
        async fn upsert(&self, points: Vec<IndexedChunk>) -> Result<(), CoreError> {
            let mut stored = self.points.lock().unwrap();
            for point in points {
                stored.retain(|p| p.id != point.id);
                stored.push(point);
            }
            Ok(())
        }

        async fn search(
            &self,
            workspace_id: String,
            _vector: Vec<f32>,
            limit: usize,
        ) -> Result<Vec<ContextChunk>, CoreError> {
            Ok(self
                .points
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.workspace_id == workspace_id)
                .take(limit)
                .map(|p| ContextChunk {
                    text: p.chunk.text.clone(),
                    source: p.chunk.source.clone(),
                    chunk_index: i64::from(p.chunk.chunk_index),
                })
                .collect())
        }
    }

    struct FakeAnswerer {
        answer: GroundedAnswer,
        calls: AtomicUsize,
    }

    impl GroundedAnswerer for FakeAnswerer {
        async fn answer(
            &self,
            _question: String,
            _context: Vec<ContextChunk>,
        ) -> Result<GroundedAnswer, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.clone())
        }
    }

    struct FakeReviewer {
        result: Result<Option<ReviewVerdict>, CoreError>,
    }

    impl ReviewWorkflow for FakeReviewer {
        async fn review(
            &self,
            _question: String,
            _base: GroundedAnswer,
        ) -> Result<Option<ReviewVerdict>, CoreError> {
            self.result.clone()
        }
    }

    type TestRag = WorkspaceRagService<FakeExtractor, FakeEmbedder, InMemoryIndex, FakeAnswerer, FakeReviewer>;

    fn service(
        texts: &[(&str, &str)],
        answer: GroundedAnswer,
        review: Result<Option<ReviewVerdict>, CoreError>,
    ) -> TestRag {
        WorkspaceRagService::new(
            Arc::new(FakeExtractor {
                texts: texts
                    .iter()
                    .map(|(name, text)| (name.to_string(), text.to_string()))
                    .collect(),
            }),
            Arc::new(FakeEmbedder),
            Arc::new(InMemoryIndex::default()),
            Arc::new(FakeAnswerer {
                answer,
                calls: AtomicUsize::new(0),
            }),
            Arc::new(FakeReviewer { result: review }),
            5,
            20,
        )
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content_type: Some("text/plain".to_string()),
            data: Bytes::from_static(b"ignored"),
        }
    }

    fn citation(source: &str, chunk_index: i64) -> Citation {
        Citation {
            source: source.to_string(),
            chunk_index,
        }
    }

    fn answer(confidence: f64, citations: Vec<Citation>) -> GroundedAnswer {
        GroundedAnswer {
            answer: "Drink warm water.".to_string(),
            confidence,
            citations,
        }
    }

    #[tokio::test]
    async fn test_ingest_indexes_chunks_and_skips_empty_files() {
        let service = service(
            &[
                ("a.txt", "first paragraph\n\nsecond paragraph"),
                ("empty.pdf", "   "),
            ],
            answer(0.5, vec![]),
            Ok(None),
        );

        let report = service
            .ingest_files("ws-1".to_string(), vec![file("a.txt"), file("empty.pdf")])
            .await
            .unwrap();

        assert_eq!(report.chunks_indexed, 2);
        assert_eq!(report.workspace_id, "ws-1");
        assert_eq!(service.index.points.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reingesting_a_file_overwrites_its_points() {
        let service = service(&[("a.txt", "only paragraph")], answer(0.5, vec![]), Ok(None));

        for _ in 0..2 {
            service
                .ingest_files("ws-1".to_string(), vec![file("a.txt")])
                .await
                .unwrap();
        }

        assert_eq!(service.index.points.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_requires_files() {
        let service = service(&[], answer(0.5, vec![]), Ok(None));

        let error = service
            .ingest_files("ws-1".to_string(), vec![])
            .await
            .unwrap_err();

        assert!(matches!(error, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_empty_context_refuses_without_model_call() {
        let service = service(&[], answer(0.9, vec![]), Ok(None));

        let result = service
            .ask("ws-empty".to_string(), "What is pitta?".to_string())
            .await
            .unwrap();

        assert_eq!(result.rag_result.answer, REFUSAL_ANSWER);
        assert_eq!(result.rag_result.confidence, 0.0);
        assert!(result.rag_result.citations.is_empty());
        assert!(!result.rag_result.needs_human_review);
        assert!(result.context_chunks.is_empty());
        assert_eq!(service.answerer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_is_sanitized_against_context() {
        let service = service(
            &[("a.txt", "warm water helps")],
            answer(1.7, vec![citation("a.txt", 0), citation("made-up.txt", 9), citation("a.txt", 0)]),
            Ok(None),
        );
        service
            .ingest_files("ws-1".to_string(), vec![file("a.txt")])
            .await
            .unwrap();

        let result = service
            .ask("ws-1".to_string(), "  What helps?  ".to_string())
            .await
            .unwrap();

        assert_eq!(result.question, "What helps?");
        assert_eq!(result.context_chunks.len(), 1);
        assert_eq!(result.rag_result.confidence, 1.0);
        assert_eq!(result.rag_result.citations, vec![citation("a.txt", 0)]);
        assert_eq!(result.rag_result.review_comment, "");
    }

    #[tokio::test]
    async fn test_review_overrides_answer() {
        let service = service(
            &[("a.txt", "warm water helps")],
            answer(0.8, vec![citation("a.txt", 0)]),
            Ok(Some(ReviewVerdict {
                approved_answer: Some("Warm water, per a.txt.".to_string()),
                confidence: Some(0.6),
                citations: None,
                needs_human_review: true,
                review_comment: Some("Phrasing tightened".to_string()),
                explanation: None,
            })),
        );
        service
            .ingest_files("ws-1".to_string(), vec![file("a.txt")])
            .await
            .unwrap();

        let result = service
            .ask("ws-1".to_string(), "What helps?".to_string())
            .await
            .unwrap();

        assert_eq!(result.rag_result.answer, "Warm water, per a.txt.");
        assert_eq!(result.rag_result.confidence, 0.6);
        assert_eq!(result.rag_result.citations, vec![citation("a.txt", 0)]);
        assert!(result.rag_result.needs_human_review);
        assert_eq!(result.rag_result.review_comment, "Phrasing tightened");
    }

    #[tokio::test]
    async fn test_unavailable_review_keeps_base_answer() {
        let service = service(
            &[("a.txt", "warm water helps")],
            answer(0.8, vec![citation("a.txt", 0)]),
            Err(CoreError::ExternalServiceError("503".to_string())),
        );
        service
            .ingest_files("ws-1".to_string(), vec![file("a.txt")])
            .await
            .unwrap();

        let result = service
            .ask("ws-1".to_string(), "What helps?".to_string())
            .await
            .unwrap();

        assert_eq!(result.rag_result.answer, "Drink warm water.");
        assert_eq!(result.rag_result.confidence, 0.8);
        assert!(!result.rag_result.needs_human_review);
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let service = service(&[], answer(0.5, vec![]), Ok(None));

        let error = service
            .ask("ws-1".to_string(), "   ".to_string())
            .await
            .unwrap_err();

        assert!(matches!(error, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_point_id_is_deterministic() {
        assert_eq!(point_id("ws", "a.txt", 0), point_id("ws", "a.txt", 0));
        assert_ne!(point_id("ws", "a.txt", 0), point_id("ws", "a.txt", 1));
        assert_ne!(point_id("ws", "a.txt", 0), point_id("other", "a.txt", 0));
    }

    #[test]
    fn test_nan_confidence_clamps_to_zero() {
        let sanitized = sanitize_answer(answer(f64::NAN, vec![]), &[]);
        assert_eq!(sanitized.confidence, 0.0);
    }

    #[test]
    fn test_escalated_verdict_falls_back_to_explanation() {
        let context = vec![ContextChunk {
            text: "warm water helps".to_string(),
            source: "a.txt".to_string(),
            chunk_index: 0,
        }];
        let verdict = ReviewVerdict {
            approved_answer: Some("Escalated.".to_string()),
            needs_human_review: true,
            review_comment: Some(" ".to_string()),
            explanation: Some("Low coverage".to_string()),
            ..ReviewVerdict::default()
        };

        let result = finalize_answer(
            answer(0.9, vec![citation("a.txt", 0)]),
            Some(verdict),
            &context,
        );

        assert_eq!(result.answer, "Escalated.");
        assert!(result.needs_human_review);
        assert_eq!(result.review_comment, "Low coverage");
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.citations, vec![citation("a.txt", 0)]);
    }
}
