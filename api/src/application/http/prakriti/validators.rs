use serde::{Deserialize, Serialize};
use swasth_core::domain::{
    generation::value_objects::{GenerationOptions, GenerationOverrides},
    prakriti::{
        entities::{PrakritiQuestion, Profile},
        value_objects::{AssessPrakritiInput, MAX_QUESTIONS},
    },
};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssessPrakritiValidator {
    #[validate(nested)]
    pub profile: Profile,

    #[serde(default)]
    #[validate(length(max = MAX_QUESTIONS, message = "at most 50 questions"))]
    pub questions: Vec<PrakritiQuestion>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default, alias = "promptVersion")]
    #[validate(range(min = 1))]
    pub prompt_version: Option<u32>,

    #[serde(default)]
    pub force: bool,
}

impl AssessPrakritiValidator {
    pub fn into_input(self, overrides: GenerationOverrides) -> AssessPrakritiInput {
        AssessPrakritiInput {
            profile: self.profile,
            questions: self.questions,
            options: GenerationOptions {
                model: self.model,
                prompt_version: self.prompt_version,
                force: self.force,
                overrides,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_too_many_questions_rejected() {
        let questions: Vec<_> = (0..51)
            .map(|i| json!({ "question": format!("Q{}", i), "answer": "often" }))
            .collect();
        let payload: AssessPrakritiValidator = serde_json::from_value(json!({
            "profile": { "name": "Ravi" },
            "questions": questions
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_questions_default_to_empty() {
        let payload: AssessPrakritiValidator =
            serde_json::from_value(json!({ "profile": { "name": "Ravi", "age": 34 } })).unwrap();

        assert!(payload.validate().is_ok());
        assert!(payload.questions.is_empty());
    }
}
