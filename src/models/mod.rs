// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BirthChart, CompatibilityPreferences, CompatibilityReport, PersonalityTraits, PlanetPlacement,
    UserRecord, WeightsUsed,
};
pub use requests::{ProfileInput, ScoreRequest};
pub use responses::{HealthResponse, ErrorResponse};
