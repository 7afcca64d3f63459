use thiserror::Error;

use crate::domain::llm::entities::ProviderError;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model returned invalid {schema} schema: {message}")]
    InvalidSchema { schema: String, message: String },

    #[error("Prompt template not found: '{task}/v{version}.txt'")]
    TemplateNotFound { task: String, version: u32 },

    #[error("Failed to render prompt: {0}")]
    PromptRender(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    pub fn invalid_schema(schema: impl Into<String>, message: impl ToString) -> Self {
        CoreError::InvalidSchema {
            schema: schema.into(),
            message: message.to_string(),
        }
    }
}
