//! Similarity clustering of personality profiles.

mod engine;

pub use engine::{Cluster, ClusteringEngine, RefinementStats};
