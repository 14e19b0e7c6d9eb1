use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::{
    calculator::CompatibilityCalculator,
    personality::{TraitWeights, DEFAULT_TRAIT_WEIGHT},
    zodiac::{SunSignTable, UnknownSign, ZodiacSign, DEFAULT_SIGN_AFFINITY},
};

/// Errors that can occur while loading reference tables
#[derive(Debug, Error)]
pub enum TablesError {
    #[error("Failed to read tables file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tables file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid sign override: {0}")]
    UnknownSign(#[from] UnknownSign),
}

/// One explicit sun-sign affinity entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignAffinity {
    pub sign: String,
    pub partner: String,
    pub affinity: f64,
    /// Also set the reverse direction
    #[serde(default = "default_true")]
    pub symmetric: bool,
}

/// Reference tables as configuration data
///
/// ```toml
/// default_sign_affinity = 0.5
/// default_trait_weight = 0.2
///
/// [trait_weights]
/// openness = 0.25
///
/// [[sign_overrides]]
/// sign = "Aries"
/// partner = "Leo"
/// affinity = 0.95
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceTables {
    /// Start from the full generated sign table; when false only overrides are set
    #[serde(default = "default_true")]
    pub generate_sign_table: bool,
    #[serde(default = "default_sign_affinity")]
    pub default_sign_affinity: f64,
    #[serde(default)]
    pub sign_overrides: Vec<SignAffinity>,
    #[serde(default = "default_trait_weight")]
    pub default_trait_weight: f64,
    #[serde(default = "default_trait_weights")]
    pub trait_weights: HashMap<String, f64>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            generate_sign_table: true,
            default_sign_affinity: default_sign_affinity(),
            sign_overrides: Vec::new(),
            default_trait_weight: default_trait_weight(),
            trait_weights: default_trait_weights(),
        }
    }
}

fn default_true() -> bool { true }
fn default_sign_affinity() -> f64 { DEFAULT_SIGN_AFFINITY }
fn default_trait_weight() -> f64 { DEFAULT_TRAIT_WEIGHT }

fn default_trait_weights() -> HashMap<String, f64> {
    ["openness", "conscientiousness", "extraversion", "agreeableness", "neuroticism"]
        .into_iter()
        .map(|name| (name.to_string(), DEFAULT_TRAIT_WEIGHT))
        .collect()
}

impl ReferenceTables {
    /// Parse tables from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, TablesError> {
        Ok(toml::from_str(text)?)
    }

    /// Load tables from a TOML file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, TablesError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Build the sun-sign table, applying overrides on top
    pub fn sun_sign_table(&self) -> Result<SunSignTable, TablesError> {
        let mut table = if self.generate_sign_table {
            SunSignTable::generated().with_default_affinity(self.default_sign_affinity)
        } else {
            SunSignTable::sparse(self.default_sign_affinity)
        };

        for entry in &self.sign_overrides {
            let sign: ZodiacSign = entry.sign.parse()?;
            let partner: ZodiacSign = entry.partner.parse()?;
            if entry.symmetric {
                table.set_pair(sign, partner, entry.affinity);
            } else {
                table.set(sign, partner, entry.affinity);
            }
        }

        Ok(table)
    }

    pub fn trait_weights(&self) -> TraitWeights {
        TraitWeights::new(
            self.trait_weights.iter().map(|(k, v)| (k.as_str(), *v)),
            self.default_trait_weight,
        )
    }

    /// Build a calculator from these tables
    pub fn build_calculator(&self) -> Result<CompatibilityCalculator, TablesError> {
        Ok(CompatibilityCalculator::new(
            self.sun_sign_table()?,
            self.trait_weights(),
        ))
    }
}
