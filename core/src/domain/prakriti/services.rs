use serde_json::json;
use validator::Validate;
use tracing::instrument;

use crate::domain::{
    archive::ports::ArchiveRepository,
    cache::ports::CacheStore,
    common::{entities::app_errors::CoreError, services::Service, side_effects::WithSideEffects},
    llm::{ports::StructuredGenerator, tasks::Task},
    prakriti::{
        entities::{PrakritiAssessment, PrakritiResponse},
        ports::PrakritiService,
        value_objects::{AssessPrakritiInput, MAX_QUESTIONS, PrakritiPromptContext},
    },
    rotation::ports::RotationRepository,
};

pub const PRAKRITI_SYSTEM_PROMPT: &str = "You are an Ayurvedic practitioner. \
Assess prakriti (constitutional balance) based on profile and answers. \
Provide concise, evidence-consistent guidance. Output ONLY valid JSON matching the schema.";

pub fn ensure_questions_reasonable(count: usize) -> Result<(), CoreError> {
    if count > MAX_QUESTIONS {
        return Err(CoreError::InvalidInput(format!(
            "Number of questions must be between 0 and {}",
            MAX_QUESTIONS
        )));
    }
    Ok(())
}

impl<G, C, RO, AR> PrakritiService for Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    #[instrument(skip(self, input), fields(questions = input.questions.len()))]
    async fn assess_prakriti(
        &self,
        input: AssessPrakritiInput,
    ) -> Result<WithSideEffects<PrakritiResponse>, CoreError> {
        input
            .profile
            .validate()
            .map_err(|e| CoreError::InvalidInput(format!("profile is invalid: {}", e)))?;
        ensure_questions_reasonable(input.questions.len())?;

        let resolved = self.resolve_generation(Task::Prakriti, &input.options);
        let context = PrakritiPromptContext::new(input.profile.clone(), &input.questions);

        let generated = self
            .cached_generation::<PrakritiAssessment, _>(
                Task::Prakriti,
                PRAKRITI_SYSTEM_PROMPT,
                &resolved,
                json!({ "p": input.profile, "qs": input.questions }),
                &context,
            )
            .await?;

        Ok(generated.map(|entry| PrakritiResponse {
            assessment: entry.data,
            meta: entry.meta,
        }))
    }
}
