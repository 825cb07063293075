//! Infrastructure for Persona Tour: profile sources and configuration files.

pub mod config_loader;
pub mod dto;
pub mod file_profile_repository;
pub mod in_memory_profile_repository;
pub mod paths;

pub use crate::config_loader::{load_pipeline_config, parse_pipeline_config};
pub use crate::file_profile_repository::{FileProfileRepository, ProfileFormat};
pub use crate::in_memory_profile_repository::InMemoryProfileRepository;
pub use crate::paths::TourPaths;
