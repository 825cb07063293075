//! On-disk profile file layouts.
//!
//! JSON files hold a plain array of profile records. TOML has no top-level
//! arrays, so TOML files use repeated `[[profile]]` tables:
//!
//! ```toml
//! [[profile]]
//! id = 1
//! traits = { O = 0.9, C = 0.1, E = 0.9, A = 0.2, N = 0.1 }
//! preferences = { F1 = 5, F2 = 4 }
//! ```

use serde::{Deserialize, Serialize};

use persona_tour_core::profile::PersonalityProfile;

/// Root of a TOML profile file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFileDTO {
    #[serde(rename = "profile", default)]
    pub profiles: Vec<PersonalityProfile>,
}

impl From<ProfileFileDTO> for Vec<PersonalityProfile> {
    fn from(dto: ProfileFileDTO) -> Self {
        dto.profiles
    }
}
