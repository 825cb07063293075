//! File-backed ProfileRepository implementation.
//!
//! The file is re-read on every request so each pipeline run sees the
//! current profile set.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use persona_tour_core::profile::{PersonalityProfile, ProfileRepository};
use persona_tour_core::{Result, TourError};

use crate::dto::ProfileFileDTO;

/// Supported profile file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Json,
    Toml,
}

impl ProfileFormat {
    /// Detects the format from the extension (`.json` or `.toml`, case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(TourError::config(format!(
                "Unsupported profile file {}: expected a .json or .toml extension",
                path.display()
            ))),
        }
    }

    /// Parses a whole document in this format.
    pub fn parse(self, content: &str) -> Result<Vec<PersonalityProfile>> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Toml => Ok(toml::from_str::<ProfileFileDTO>(content)?.into()),
        }
    }
}

/// Runs boundary validation on every profile and rejects duplicate ids.
///
/// All problems are reported together.
pub fn validate_profiles(profiles: &[PersonalityProfile]) -> Result<()> {
    let mut seen = HashSet::with_capacity(profiles.len());
    let mut problems = Vec::new();

    for profile in profiles {
        if let Err(e) = profile.validate() {
            problems.push(e);
        }
        if !seen.insert(profile.id) {
            problems.push(TourError::invalid_profile(profile.id, "duplicate profile id"));
        }
    }

    match TourError::from_many(problems) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Reads profiles from a JSON or TOML file.
#[derive(Debug, Clone)]
pub struct FileProfileRepository {
    path: PathBuf,
    format: ProfileFormat,
}

impl FileProfileRepository {
    /// Creates a repository for `path`. Fails if the extension is unsupported.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = ProfileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ProfileFormat {
        self.format
    }
}

#[async_trait::async_trait]
impl ProfileRepository for FileProfileRepository {
    async fn get_all(&self) -> Result<Vec<PersonalityProfile>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TourError::not_found(
                    "profile file",
                    self.path.display().to_string(),
                ));
            }
            Err(e) => {
                return Err(TourError::io(format!(
                    "Failed to read profile file at {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if content.trim().is_empty() {
            tracing::warn!(path = %self.path.display(), "profile file is empty");
            return Ok(Vec::new());
        }

        let profiles = self.format.parse(&content)?;
        validate_profiles(&profiles)?;

        tracing::debug!(
            path = %self.path.display(),
            count = profiles.len(),
            "loaded profiles"
        );
        Ok(profiles)
    }
}
