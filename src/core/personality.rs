use std::collections::HashMap;

use crate::models::{CompatibilityPreferences, PersonalityTraits};

/// Weight applied to traits without an explicit entry
pub const DEFAULT_TRAIT_WEIGHT: f64 = 0.2;

/// Multiplier for traits the user lists as desired
pub const DESIRED_TRAIT_BONUS: f64 = 1.2;

/// Multiplier for traits the user lists as deal breakers
pub const DEAL_BREAKER_PENALTY: f64 = 0.5;

/// Trait values are on a 0-10 scale
const TRAIT_SCALE: f64 = 10.0;

/// Per-trait weights with a fallback for unlisted traits
///
/// Keys are stored lower-cased; lookups lower-case the queried name, so
/// weight lookup is case-insensitive while trait matching elsewhere is not.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitWeights {
    weights: HashMap<String, f64>,
    default_weight: f64,
}

impl TraitWeights {
    pub fn new<I, K>(weights: I, default_weight: f64) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|(name, weight)| (name.as_ref().to_lowercase(), weight.clamp(0.0, 1.0)))
                .collect(),
            default_weight: default_weight.clamp(0.0, 1.0),
        }
    }

    /// Big Five traits at equal weight
    pub fn big_five() -> Self {
        Self::new(
            [
                ("openness", 0.2),
                ("conscientiousness", 0.2),
                ("extraversion", 0.2),
                ("agreeableness", 0.2),
                ("neuroticism", 0.2),
            ],
            DEFAULT_TRAIT_WEIGHT,
        )
    }

    #[inline]
    pub fn weight(&self, trait_name: &str) -> f64 {
        self.weights
            .get(&trait_name.to_lowercase())
            .copied()
            .unwrap_or(self.default_weight)
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for TraitWeights {
    fn default() -> Self {
        Self::big_five()
    }
}

/// Similarity of two trait values on the 0-10 scale
///
/// Not clamped: differences above 10 give a negative similarity.
#[inline]
pub fn trait_similarity(user_value: f64, partner_value: f64) -> f64 {
    1.0 - (user_value - partner_value).abs() / TRAIT_SCALE
}

/// Calculate personality compatibility (0-100) between two trait maps
///
/// Only traits present in both maps count. Each shared trait contributes its
/// similarity times its weight, boosted for desired traits and then reduced
/// for deal breakers. The result is the mean contribution scaled to 100 and
/// clamped to [0, 100]; with no shared traits the score is 0.
pub fn calculate_personality_compatibility(
    user_traits: &PersonalityTraits,
    partner_traits: &PersonalityTraits,
    preferences: &CompatibilityPreferences,
    weights: &TraitWeights,
) -> f64 {
    let mut total = 0.0;
    let mut shared = 0usize;

    for (trait_name, &user_value) in user_traits {
        let Some(&partner_value) = partner_traits.get(trait_name) else {
            continue;
        };
        shared += 1;

        let mut contribution =
            trait_similarity(user_value, partner_value) * weights.weight(trait_name);

        if preferences.is_desired(trait_name) {
            contribution *= DESIRED_TRAIT_BONUS;
        }
        if preferences.is_deal_breaker(trait_name) {
            contribution *= DEAL_BREAKER_PENALTY;
        }

        tracing::trace!("Trait {} contributes {:.4}", trait_name, contribution);
        total += contribution;
    }

    if shared == 0 {
        return 0.0;
    }

    (total / shared as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(pairs: &[(&str, f64)]) -> PersonalityTraits {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_weight_lookup_case_insensitive() {
        let weights = TraitWeights::new([("Openness", 0.5)], 0.2);
        assert_eq!(weights.weight("openness"), 0.5);
        assert_eq!(weights.weight("OPENNESS"), 0.5);
        assert_eq!(weights.weight("humor"), 0.2);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(trait_similarity(5.0, 5.0), 1.0);
        assert!((trait_similarity(8.0, 6.0) - 0.8).abs() < 1e-12);
        assert!(trait_similarity(0.0, 15.0) < 0.0);
    }

    #[test]
    fn test_desired_trait_scenario() {
        let user = traits(&[("openness", 8.0), ("agreeableness", 6.0)]);
        let partner = traits(&[("openness", 6.0), ("agreeableness", 6.0)]);
        let prefs = CompatibilityPreferences {
            desired_traits: HashMap::from([("openness".to_string(), 1.0)]),
            ..Default::default()
        };

        let score =
            calculate_personality_compatibility(&user, &partner, &prefs, &TraitWeights::default());
        assert!((score - 19.6).abs() < 1e-9, "expected 19.6, got {}", score);
    }

    #[test]
    fn test_bonus_then_penalty() {
        let user = traits(&[("openness", 5.0)]);
        let partner = traits(&[("openness", 5.0)]);
        let prefs = CompatibilityPreferences {
            desired_traits: HashMap::from([("openness".to_string(), 1.0)]),
            deal_breakers: vec!["openness".to_string()],
            ..Default::default()
        };

        // 1.0 * 0.2 * 1.2 * 0.5
        let score =
            calculate_personality_compatibility(&user, &partner, &prefs, &TraitWeights::default());
        assert!((score - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_unshared_traits_skipped() {
        let user = traits(&[("openness", 5.0), ("humor", 2.0)]);
        let partner = traits(&[("openness", 5.0)]);
        let score = calculate_personality_compatibility(
            &user,
            &partner,
            &CompatibilityPreferences::default(),
            &TraitWeights::default(),
        );
        assert!((score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_trait_match_is_case_sensitive() {
        let user = traits(&[("Openness", 5.0)]);
        let partner = traits(&[("openness", 5.0)]);
        let score = calculate_personality_compatibility(
            &user,
            &partner,
            &CompatibilityPreferences::default(),
            &TraitWeights::default(),
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_negative_similarity_clamped() {
        let user = traits(&[("openness", 0.0)]);
        let partner = traits(&[("openness", 25.0)]);
        let score = calculate_personality_compatibility(
            &user,
            &partner,
            &CompatibilityPreferences::default(),
            &TraitWeights::default(),
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_desired_bonus_clamped_at_hundred() {
        let user = traits(&[("openness", 7.0)]);
        let partner = traits(&[("openness", 7.0)]);
        let prefs = CompatibilityPreferences {
            desired_traits: HashMap::from([("openness".to_string(), 1.0)]),
            ..Default::default()
        };
        let weights = TraitWeights::new([("openness", 1.0)], 0.2);

        // 1.0 * 1.0 * 1.2 would be 120
        let score = calculate_personality_compatibility(&user, &partner, &prefs, &weights);
        assert_eq!(score, 100.0);
    }
}
