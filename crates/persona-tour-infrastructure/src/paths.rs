//! Path management for Persona Tour configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/persona-tour/      # Config directory (platform dependent)
//! └── config.toml              # Pipeline configuration
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "persona-tour";
const CONFIG_FILE: &str = "config.toml";

/// Resolves the well-known locations used by the CLI.
pub struct TourPaths;

impl TourPaths {
    /// Returns the persona-tour configuration directory, if the platform has one.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    }

    /// Returns the path to the default `config.toml`.
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_app_dir() {
        if let Some(path) = TourPaths::config_file() {
            assert!(path.ends_with("persona-tour/config.toml"));
        }
    }
}
