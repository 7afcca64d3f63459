use crate::domain::rag::entities::ContextChunk;

pub const REFUSAL_ANSWER: &str = "I cannot answer this based on the provided context.";

pub const EXTRACTION_PROMPT: &str = "You are a document text extractor. \
Read the content of the attached file and return ONLY the plain text content, \
with no formatting, explanations, or extra commentary.";

pub const GROUNDED_ANSWER_SYSTEM_PROMPT: &str = r#"You are an answer-generation agent for a Retrieval-Augmented Generation (RAG) system.

You are given:
- a user's question
- a set of context chunks extracted from the user's private documents

Rules:
1. Use ONLY the provided context to answer. Do NOT use outside knowledge.
2. If the answer is not clearly supported by the context, say:
   "I cannot answer this based on the provided context."
3. Be concise and factual.
4. Provide a confidence score between 0.0 and 1.0 that reflects how well the context supports your answer.
5. Provide citations: a list of objects { "source": string, "chunk_index": number } corresponding to the chunks you used.

Return ONLY valid JSON in this exact format:

{
  "answer": "<string>",
  "confidence": <float between 0 and 1>,
  "citations": [
    { "source": "<string>", "chunk_index": <number> }
  ]
}"#;

/// Numbered context blocks, one per chunk.
pub fn render_context(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            format!(
                "[{}] source={}, chunk_index={}\n{}\n",
                i, chunk.source, chunk.chunk_index, chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn grounded_user_prompt(question: &str, chunks: &[ContextChunk]) -> String {
    format!(
        "Question:\n{}\n\nContext Chunks:\n{}",
        question,
        render_context(chunks)
    )
}
