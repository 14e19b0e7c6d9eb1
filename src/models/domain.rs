use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::core::aspects::Planet;

/// Personality traits keyed by trait name, each on a 0-10 scale
pub type PersonalityTraits = HashMap<String, f64>;

/// Placement of a single planet in a birth chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetPlacement {
    /// Ecliptic longitude in degrees [0, 360)
    #[serde(default)]
    pub position: f64,
    /// House number (1-12), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

/// Birth chart with a sun sign and optional per-planet placements
///
/// Serialized in the flat shape used by upstream profile data:
/// ```json
/// { "sun_sign": "Aries", "Sun": { "position": 12.5, "house": 1 }, "Moon": { "position": 200.0 } }
/// ```
///
/// Other keys (ascendant, moon sign, ...) are ignored on input rather than
/// rejected, as are planet entries that are not placement objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(from = "RawBirthChart")]
pub struct BirthChart {
    #[validate(length(min = 1))]
    pub sun_sign: String,
    #[serde(flatten)]
    pub planets: HashMap<String, PlanetPlacement>,
}

/// Birth chart as it arrives, before unusable entries are dropped
#[derive(Deserialize)]
struct RawBirthChart {
    sun_sign: String,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl From<RawBirthChart> for BirthChart {
    fn from(raw: RawBirthChart) -> Self {
        let planets = raw
            .extra
            .into_iter()
            .filter(|(_, value)| value.is_object())
            .filter_map(|(key, value)| {
                serde_json::from_value::<PlanetPlacement>(value)
                    .map(|placement| (key, placement))
                    .ok()
            })
            .collect();

        Self {
            sun_sign: raw.sun_sign,
            planets,
        }
    }
}

impl BirthChart {
    pub fn new(sun_sign: impl Into<String>) -> Self {
        Self {
            sun_sign: sun_sign.into(),
            planets: HashMap::new(),
        }
    }

    /// Builder helper to place a planet
    pub fn with_planet(mut self, planet: Planet, position: f64, house: Option<u8>) -> Self {
        self.planets
            .insert(planet.name().to_string(), PlanetPlacement { position, house });
        self
    }

    /// Position of a planet in degrees, defaulting to 0 when absent
    pub fn position(&self, planet: Planet) -> f64 {
        self.planets
            .get(planet.name())
            .map(|p| p.position)
            .unwrap_or(0.0)
    }

    /// House of a planet, if present and within 1-12
    pub fn house(&self, planet: Planet) -> Option<u8> {
        self.planets
            .get(planet.name())
            .and_then(|p| p.house)
            .filter(|h| (1..=12).contains(h))
    }
}

/// User compatibility preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompatibilityPreferences {
    /// Traits the user wants; only key membership is used for scoring
    #[serde(default)]
    pub desired_traits: HashMap<String, f64>,
    #[serde(default)]
    pub deal_breakers: Vec<String>,
    #[validate(range(min = 0.0))]
    pub personality_weight: f64,
    #[validate(range(min = 0.0))]
    pub astrology_weight: f64,
}

impl CompatibilityPreferences {
    pub fn is_desired(&self, trait_name: &str) -> bool {
        self.desired_traits.contains_key(trait_name)
    }

    pub fn is_deal_breaker(&self, trait_name: &str) -> bool {
        self.deal_breakers.iter().any(|t| t == trait_name)
    }

    pub fn weights(&self) -> WeightsUsed {
        WeightsUsed {
            personality_weight: self.personality_weight,
            astrology_weight: self.astrology_weight,
        }
    }
}

impl Default for CompatibilityPreferences {
    fn default() -> Self {
        Self {
            desired_traits: HashMap::new(),
            deal_breakers: Vec::new(),
            personality_weight: 0.5,
            astrology_weight: 0.5,
        }
    }
}

/// A user record as supplied by the profile store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "isPremium", default)]
    pub is_premium: bool,
    #[serde(rename = "personalityTraits", default)]
    pub personality_traits: PersonalityTraits,
    #[serde(rename = "birthChart")]
    pub birth_chart: BirthChart,
    #[serde(default)]
    pub preferences: Option<CompatibilityPreferences>,
}

impl UserRecord {
    /// Preferences to score with, falling back to defaults
    pub fn preferences_or_default(&self) -> CompatibilityPreferences {
        self.preferences.clone().unwrap_or_default()
    }
}

/// Raw preference weights echoed back with a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightsUsed {
    pub personality_weight: f64,
    pub astrology_weight: f64,
}

/// Final compatibility result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub overall: f64,
    pub personality: f64,
    pub astrological: f64,
    pub weights_used: WeightsUsed,
}
