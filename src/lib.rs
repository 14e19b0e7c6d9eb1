//! Compat Algo - personality and astrology compatibility scoring
//!
//! This library provides the scoring engine behind the compatibility service.
//! Two profiles are scored on shared personality traits and on their birth
//! charts, then blended by the requesting user's weights.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CompatibilityCalculator, CompatibilityError, ProfileView, ReferenceTables};
pub use models::{
    BirthChart, CompatibilityPreferences, CompatibilityReport, PersonalityTraits, UserRecord,
};
