// Core algorithm exports
pub mod aspects;
pub mod calculator;
pub mod personality;
pub mod tables;
pub mod zodiac;

pub use aspects::{
    angular_distance, calculate_aspect_compatibility, calculate_house_compatibility, Aspect, Planet,
};
pub use calculator::{CompatibilityCalculator, CompatibilityError, ProfileView};
pub use personality::{TraitWeights, calculate_personality_compatibility};
pub use tables::{ReferenceTables, SignAffinity, TablesError};
pub use zodiac::{SunSignTable, ZodiacSign};
