use thiserror::Error;

use crate::core::{
    aspects::{calculate_aspect_compatibility, calculate_house_compatibility},
    personality::{calculate_personality_compatibility, TraitWeights},
    zodiac::SunSignTable,
};
use crate::models::{BirthChart, CompatibilityPreferences, CompatibilityReport, PersonalityTraits};

/// Component weights for premium astrological scoring
const SUN_SIGN_SHARE: f64 = 0.4;
const ASPECT_SHARE: f64 = 0.3;
const HOUSE_SHARE: f64 = 0.3;

/// Errors raised by the scoring engine
#[derive(Debug, Error, PartialEq)]
pub enum CompatibilityError {
    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),
}

/// Two profiles' scoring inputs, borrowed from wherever they live
#[derive(Debug, Clone, Copy)]
pub struct ProfileView<'a> {
    pub traits: &'a PersonalityTraits,
    pub chart: &'a BirthChart,
}

/// Compatibility scoring engine
///
/// Holds only the two reference tables and no per-request state, so a single
/// value can be cloned into every worker and shared freely.
///
/// # Pipeline
/// 1. Personality score from shared traits
/// 2. Astrological score (sun sign, plus aspects and houses for premium)
/// 3. Weighted blend of the two into the overall score
#[derive(Debug, Clone, Default)]
pub struct CompatibilityCalculator {
    sun_signs: SunSignTable,
    trait_weights: TraitWeights,
}

impl CompatibilityCalculator {
    pub fn new(sun_signs: SunSignTable, trait_weights: TraitWeights) -> Self {
        Self {
            sun_signs,
            trait_weights,
        }
    }

    pub fn sun_signs(&self) -> &SunSignTable {
        &self.sun_signs
    }

    pub fn trait_weights(&self) -> &TraitWeights {
        &self.trait_weights
    }

    /// Personality compatibility (0-100)
    pub fn calculate_personality_compatibility(
        &self,
        user_traits: &PersonalityTraits,
        partner_traits: &PersonalityTraits,
        preferences: &CompatibilityPreferences,
    ) -> f64 {
        calculate_personality_compatibility(
            user_traits,
            partner_traits,
            preferences,
            &self.trait_weights,
        )
    }

    /// Astrological compatibility (0-100)
    ///
    /// Non-premium users get the sun-sign score only. Premium users get a blend
    /// of sun sign (40%), planetary aspects (30%) and house placements (30%).
    pub fn calculate_astrological_compatibility(
        &self,
        user_chart: &BirthChart,
        partner_chart: &BirthChart,
        is_premium: bool,
    ) -> f64 {
        let sun_sign_score = self
            .sun_signs
            .affinity(&user_chart.sun_sign, &partner_chart.sun_sign)
            * 100.0;

        if !is_premium {
            return sun_sign_score;
        }

        let aspect_score = calculate_aspect_compatibility(user_chart, partner_chart);
        let house_score = calculate_house_compatibility(user_chart, partner_chart);

        tracing::debug!(
            "Astrology components: sun_sign={:.2}, aspects={:.2}, houses={:.2}",
            sun_sign_score,
            aspect_score,
            house_score
        );

        let blended = sun_sign_score * SUN_SIGN_SHARE
            + aspect_score * ASPECT_SHARE
            + house_score * HOUSE_SHARE;

        blended.clamp(0.0, 100.0)
    }

    /// Blend the two sub-scores by the user's normalized weights (0-100)
    ///
    /// Weights need not sum to 1 but must be finite, non-negative and have a
    /// positive sum.
    pub fn calculate_final_compatibility(
        &self,
        personality_score: f64,
        astrology_score: f64,
        preferences: &CompatibilityPreferences,
    ) -> Result<f64, CompatibilityError> {
        let (personality_weight, astrology_weight) = normalized_weights(preferences)?;

        let final_score =
            personality_score * personality_weight + astrology_score * astrology_weight;

        Ok(final_score.clamp(0.0, 100.0))
    }

    /// Run the full pipeline for one pair of profiles
    pub fn evaluate(
        &self,
        user: ProfileView<'_>,
        partner: ProfileView<'_>,
        preferences: &CompatibilityPreferences,
        is_premium: bool,
    ) -> Result<CompatibilityReport, CompatibilityError> {
        // Fail before doing any work if the blend is impossible
        normalized_weights(preferences)?;

        let personality =
            self.calculate_personality_compatibility(user.traits, partner.traits, preferences);
        let astrological =
            self.calculate_astrological_compatibility(user.chart, partner.chart, is_premium);
        let overall = self.calculate_final_compatibility(personality, astrological, preferences)?;

        tracing::debug!(
            "Compatibility: overall={:.2}, personality={:.2}, astrological={:.2}, premium={}",
            overall,
            personality,
            astrological,
            is_premium
        );

        Ok(CompatibilityReport {
            overall,
            personality,
            astrological,
            weights_used: preferences.weights(),
        })
    }
}

/// Normalize preference weights so they sum to 1
fn normalized_weights(
    preferences: &CompatibilityPreferences,
) -> Result<(f64, f64), CompatibilityError> {
    let p = preferences.personality_weight;
    let a = preferences.astrology_weight;

    if !p.is_finite() || !a.is_finite() {
        return Err(CompatibilityError::InvalidPreferences(
            "weights must be finite numbers".to_string(),
        ));
    }
    if p < 0.0 || a < 0.0 {
        return Err(CompatibilityError::InvalidPreferences(
            "weights must not be negative".to_string(),
        ));
    }

    let total = p + a;
    if total <= 0.0 {
        return Err(CompatibilityError::InvalidPreferences(
            "personality_weight + astrology_weight must be positive".to_string(),
        ));
    }

    let personality_weight = p / total;
    Ok((personality_weight, 1.0 - personality_weight))
}
