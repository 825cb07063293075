//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: trait vectors, category codes, preferences and profiles
//! - `repository`: repository trait for profile retrieval

mod model;
mod repository;

pub use model::{
    CategoryCode, DEFAULT_LIKED_THRESHOLD, PersonalityProfile, Preferences, TRAIT_DIMENSIONS,
    TraitVector,
};
pub use repository::ProfileRepository;
