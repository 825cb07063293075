//! Domain core of Persona Tour.
//!
//! Recommends POI categories to groups of tourists in three stages:
//!
//! 1. [`clustering`] groups profiles by Big Five trait proximity,
//! 2. [`excursion`] partitions the clustered group into subgroups,
//! 3. [`mining`] and [`recommendation`] derive per-subgroup inclusion and
//!    exclusion lists from rating averages and association rules.
//!
//! ```
//! use persona_tour_core::config::PipelineConfig;
//! use persona_tour_core::excursion::ExcursionGroup;
//! use persona_tour_core::profile::{PersonalityProfile, Preferences, TraitVector};
//!
//! let prefs: Preferences = [("F1", 5.0), ("F2", 4.0)].into_iter().collect();
//! let profile = PersonalityProfile::new(1, TraitVector::new(0.9, 0.1, 0.9, 0.2, 0.1), prefs);
//!
//! let subgroups = ExcursionGroup::new(vec![profile]).recommend(&PipelineConfig::default());
//! assert_eq!(subgroups.len(), 1);
//! assert_eq!(subgroups[0].poi_inclusion.len(), 2);
//! ```

pub mod clustering;
pub mod config;
pub mod error;
pub mod excursion;
pub mod mining;
pub mod profile;
pub mod questionnaire;
pub mod recommendation;

// Re-export common error type
pub use error::{Result, TourError};
