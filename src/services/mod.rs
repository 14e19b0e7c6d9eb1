// Service exports
pub mod profiles;

pub use profiles::{InMemoryProfileStore, ProfileError, ProfileStore};
