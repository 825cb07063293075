//! Profile repository trait.
//!
//! Defines the retrieval interface the pipeline's callers use to materialize
//! the profile set of a request.

use super::model::PersonalityProfile;
use crate::error::Result;

/// An abstract source of tourist profiles.
///
/// This trait decouples use cases from the storage mechanism (JSON file,
/// TOML file, database, remote API). Implementations are expected to run
/// [`PersonalityProfile::validate`] on every record they return.
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Retrieves all profiles, in a stable order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<PersonalityProfile>)`: All stored profiles
    /// - `Err(TourError)`: Error if retrieval or validation fails
    async fn get_all(&self) -> Result<Vec<PersonalityProfile>>;

    /// Retrieves one profile by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(profile))`: Profile found
    /// - `Ok(None)`: No profile with that id
    /// - `Err(TourError)`: Error if retrieval fails
    async fn find_by_id(&self, id: u64) -> Result<Option<PersonalityProfile>> {
        Ok(self.get_all().await?.into_iter().find(|p| p.id == id))
    }
}
