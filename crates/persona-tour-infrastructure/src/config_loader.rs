//! Loads [`PipelineConfig`] from TOML.
//!
//! A missing or blank default file means "use defaults". Every loaded
//! configuration is validated before it is returned.

use std::fs;
use std::path::Path;

use persona_tour_core::config::PipelineConfig;
use persona_tour_core::{Result, TourError};

use crate::paths::TourPaths;

/// Parses a TOML document. Sections and keys left out keep their defaults.
pub fn parse_pipeline_config(content: &str) -> Result<PipelineConfig> {
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }
    let config: PipelineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Loads the pipeline configuration.
///
/// # Arguments
///
/// * `path` - Explicit config file. When `None`, the default location
///   from [`TourPaths::config_file`] is used.
///
/// # Returns
///
/// - `Ok(PipelineConfig)`: The parsed configuration, or defaults when the
///   default file does not exist or is empty
/// - `Err(TourError::NotFound)`: An explicit path does not exist
/// - `Err(TourError)`: The file cannot be read, parsed or validated
pub fn load_pipeline_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(TourError::not_found(
                    "config file",
                    explicit.display().to_string(),
                ));
            }
            explicit.to_path_buf()
        }
        None => match TourPaths::config_file() {
            Some(default_path) if default_path.exists() => default_path,
            _ => {
                tracing::debug!("no config file found, using defaults");
                return Ok(PipelineConfig::default());
            }
        },
    };

    let content = fs::read_to_string(&config_path).map_err(|e| {
        TourError::io(format!(
            "Failed to read config file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let config = parse_pipeline_config(&content)?;
    tracing::info!(path = %config_path.display(), "loaded pipeline config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_blank_document_gives_defaults() {
        assert_eq!(parse_pipeline_config("  \n").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = parse_pipeline_config(
            r#"
[mining]
min_support = 0.4

[partition]
min_group_size = 8
"#,
        )
        .unwrap();

        assert_eq!(config.mining.min_support, 0.4);
        assert_eq!(config.mining.min_confidence, 0.5);
        assert_eq!(config.partition.min_group_size, 8);
        assert_eq!(config.partition.min_cluster_size, 3);
        assert_eq!(config.clustering, PipelineConfig::default().clustering);
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let err = parse_pipeline_config("[clustering]\nsimilarity_threshold = 1.5\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_malformed_toml_is_a_serialization_error() {
        let err = parse_pipeline_config("[mining\nmin_support = ").unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[clustering]\nmax_iterations = 7").unwrap();

        let config = load_pipeline_config(Some(file.path())).unwrap();
        assert_eq!(config.clustering.max_iterations, 7);
    }

    #[test]
    fn test_missing_explicit_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pipeline_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.is_not_found());
    }
}
