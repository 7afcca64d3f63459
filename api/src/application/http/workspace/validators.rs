use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Blank questions are rejected by the service with a 400.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AskWorkspaceValidator {
    #[serde(default)]
    pub question: String,
}
