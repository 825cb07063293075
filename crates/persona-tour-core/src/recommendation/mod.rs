//! POI recommendation builders.

mod builder;
mod reduced;

pub use builder::PoiRecommendationBuilder;
pub use reduced::{ReducedRecommendation, recommend_without_clustering};
