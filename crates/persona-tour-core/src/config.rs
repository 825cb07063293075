//! Pipeline configuration.
//!
//! Every section deserializes with defaults so a config file only needs the
//! keys it overrides:
//!
//! ```toml
//! [clustering]
//! similarity_threshold = 0.75
//!
//! [mining]
//! min_confidence = 0.6
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TourError};
use crate::profile::DEFAULT_LIKED_THRESHOLD;

/// Settings of the similarity clustering engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringSettings {
    /// Minimum similarity for joining an existing cluster.
    pub similarity_threshold: f64,
    /// Refinement iteration cap.
    pub max_iterations: usize,
    /// Largest per-dimension centroid movement still considered converged.
    pub tolerance: f64,
}

impl Default for ClusteringSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Settings of the subgroup partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionSettings {
    /// Groups smaller than this are never split.
    pub min_group_size: usize,
    /// Clusters with at least this many members seed their own subgroup.
    pub min_cluster_size: usize,
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            min_group_size: 6,
            min_cluster_size: 3,
        }
    }
}

/// Thresholds of the frequent pattern miner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningSettings {
    pub min_support: f64,
    pub min_confidence: f64,
}

impl MiningSettings {
    /// Thresholds of the grouped recommendation pipeline.
    pub const GROUPED: Self = Self {
        min_support: 0.3,
        min_confidence: 0.5,
    };

    /// Thresholds of the reduced, non-clustered path.
    pub const REDUCED: Self = Self {
        min_support: 0.3,
        min_confidence: 0.6,
    };
}

impl Default for MiningSettings {
    fn default() -> Self {
        Self::GROUPED
    }
}

/// Rating thresholds used by the POI recommendation builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Ratings at or above this floor enter the per-category averages.
    pub average_rating_floor: f64,
    /// Average at or above which a category is included, otherwise excluded.
    pub inclusion_threshold: f64,
    /// Ratings at or above this floor put a category into a member's transaction.
    pub transaction_rating_floor: f64,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            average_rating_floor: DEFAULT_LIKED_THRESHOLD,
            inclusion_threshold: DEFAULT_LIKED_THRESHOLD,
            transaction_rating_floor: DEFAULT_LIKED_THRESHOLD,
        }
    }
}

/// Complete configuration of one recommendation run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub clustering: ClusteringSettings,
    pub partition: PartitionSettings,
    pub mining: MiningSettings,
    pub builder: BuilderSettings,
}

impl PipelineConfig {
    /// Checks every setting, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        let unit = |name: &str, value: f64, problems: &mut Vec<TourError>| {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                problems.push(TourError::config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        };

        unit(
            "clustering.similarity_threshold",
            self.clustering.similarity_threshold,
            &mut problems,
        );
        unit("mining.min_support", self.mining.min_support, &mut problems);
        unit("mining.min_confidence", self.mining.min_confidence, &mut problems);

        if self.clustering.max_iterations == 0 {
            problems.push(TourError::config("clustering.max_iterations must be positive"));
        }
        if self.clustering.tolerance.is_nan() || self.clustering.tolerance <= 0.0 {
            problems.push(TourError::config(format!(
                "clustering.tolerance must be positive, got {}",
                self.clustering.tolerance
            )));
        }
        if self.partition.min_cluster_size == 0 {
            problems.push(TourError::config("partition.min_cluster_size must be positive"));
        }
        for (name, value) in [
            ("builder.average_rating_floor", self.builder.average_rating_floor),
            ("builder.inclusion_threshold", self.builder.inclusion_threshold),
            ("builder.transaction_rating_floor", self.builder.transaction_rating_floor),
        ] {
            if !value.is_finite() {
                problems.push(TourError::config(format!("{name} must be finite")));
            }
        }

        match TourError::from_many(problems) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
