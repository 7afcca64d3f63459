use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{generation::entities::GenerationMeta, meal_plan::entities::Dosha};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Profile {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrakritiQuestion {
    pub question: String,
    /// Free text or an option id.
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct DoshaDistribution {
    #[validate(range(min = 0.0, max = 100.0))]
    pub vata: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub pitta: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub kapha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrakritiGuidance {
    pub foods_to_favor: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub lifestyle_tips: Vec<String>,
}

/// Assessment document as produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrakritiAssessment {
    pub primary_dosha: Dosha,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_dosha: Option<Dosha>,
    #[validate(nested)]
    pub distribution: DoshaDistribution,
    pub guidance: PrakritiGuidance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrakritiResponse {
    #[serde(flatten)]
    pub assessment: PrakritiAssessment,
    pub meta: GenerationMeta,
}
