//! In-memory ProfileRepository implementation.
//!
//! Useful for embedding the pipeline (profiles assembled by the caller, for
//! example from scored questionnaires) and for tests.

use tokio::sync::RwLock;

use persona_tour_core::Result;
use persona_tour_core::profile::{PersonalityProfile, ProfileRepository};

use crate::file_profile_repository::validate_profiles;

/// Holds a validated profile set in memory.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<PersonalityProfile>>,
}

impl InMemoryProfileRepository {
    /// Creates a repository after validating `profiles`.
    pub fn new(profiles: Vec<PersonalityProfile>) -> Result<Self> {
        validate_profiles(&profiles)?;
        Ok(Self {
            profiles: RwLock::new(profiles),
        })
    }

    /// Replaces the stored set. On validation failure the old set is kept.
    pub async fn replace_all(&self, profiles: Vec<PersonalityProfile>) -> Result<()> {
        validate_profiles(&profiles)?;
        *self.profiles.write().await = profiles;
        Ok(())
    }

    /// Appends one profile, rejecting invalid records and duplicate ids.
    pub async fn insert(&self, profile: PersonalityProfile) -> Result<()> {
        let mut guard = self.profiles.write().await;
        let mut candidate = guard.clone();
        candidate.push(profile);
        validate_profiles(&candidate)?;
        *guard = candidate;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get_all(&self) -> Result<Vec<PersonalityProfile>> {
        Ok(self.profiles.read().await.clone())
    }
}
