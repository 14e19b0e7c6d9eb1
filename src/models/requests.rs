use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{BirthChart, CompatibilityPreferences, PersonalityTraits};

/// Profile supplied inline with a score request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileInput {
    #[serde(alias = "personality_traits", rename = "personalityTraits", default)]
    pub personality_traits: PersonalityTraits,
    #[validate(nested)]
    #[serde(alias = "birth_chart", rename = "birthChart")]
    pub birth_chart: BirthChart,
}

/// Request to score two inline profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(nested)]
    pub user: ProfileInput,
    #[validate(nested)]
    pub partner: ProfileInput,
    #[validate(nested)]
    #[serde(default)]
    pub preferences: CompatibilityPreferences,
    #[serde(alias = "is_premium", rename = "isPremium", default)]
    pub is_premium: bool,
}
