use crate::models::UserRecord;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when looking up profiles
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Failed to read profile seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid profile data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only access to already-materialized user records
pub trait ProfileStore: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<UserRecord, ProfileError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Profile store backed by an in-memory map
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    users: HashMap<String, UserRecord>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records; later duplicates replace earlier ones
    pub fn from_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|record| (record.user_id.clone(), record))
            .collect();
        Self { users }
    }

    /// Parse a JSON array of user records
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let records: Vec<UserRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Load a JSON array of user records from disk
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded {} profiles from {}",
            store.users.len(),
            path.as_ref().display()
        );
        Ok(store)
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get_user(&self, user_id: &str) -> Result<UserRecord, ProfileError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))
    }

    fn len(&self) -> usize {
        self.users.len()
    }
}
