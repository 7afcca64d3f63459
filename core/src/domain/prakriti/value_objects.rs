use serde::Serialize;

use crate::domain::{
    generation::value_objects::GenerationOptions,
    prakriti::entities::{PrakritiQuestion, Profile},
};

pub const MAX_QUESTIONS: usize = 50;

#[derive(Debug, Clone)]
pub struct AssessPrakritiInput {
    pub profile: Profile,
    pub questions: Vec<PrakritiQuestion>,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrakritiPromptContext {
    pub profile: Profile,
    /// One `Q: ... / A: ...` block per question.
    pub questions: String,
}

impl PrakritiPromptContext {
    pub fn new(profile: Profile, questions: &[PrakritiQuestion]) -> Self {
        let questions = if questions.is_empty() {
            "none".to_string()
        } else {
            questions
                .iter()
                .enumerate()
                .map(|(i, q)| format!("{}. Q: {}\n   A: {}", i + 1, q.question.trim(), q.answer.trim()))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Self { profile, questions }
    }
}
