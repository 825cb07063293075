//! The per-request coordinator of the recommendation pipeline.

use crate::clustering::ClusteringEngine;
use crate::config::PipelineConfig;
use crate::profile::PersonalityProfile;
use crate::recommendation::PoiRecommendationBuilder;

use super::partitioner::SubgroupPartitioner;
use super::subgroup::Subgroup;

/// Every tourist of one excursion request.
///
/// Lives for a single request: it clusters the profiles from scratch,
/// partitions them and builds POI lists for each subgroup. Nothing survives
/// between requests.
#[derive(Debug, Clone, Default)]
pub struct ExcursionGroup {
    profiles: Vec<PersonalityProfile>,
}

impl ExcursionGroup {
    pub fn new(profiles: Vec<PersonalityProfile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[PersonalityProfile] {
        &self.profiles
    }

    /// Clusters the group with a fresh engine.
    pub fn cluster(&self, config: &PipelineConfig) -> ClusteringEngine {
        let engine = ClusteringEngine::fit(config.clustering, self.profiles.iter().cloned());
        let stats = engine.last_refinement();

        tracing::info!(
            profiles = engine.profiles().len(),
            clusters = engine.clusters().len(),
            iterations = stats.iterations,
            "clustered excursion group"
        );
        if !engine.profiles().is_empty() && !stats.converged {
            tracing::warn!(
                max_iterations = config.clustering.max_iterations,
                "clustering stopped at the iteration cap; using the last assignment"
            );
        }

        engine
    }

    /// Runs clustering, partitioning and the per-subgroup builder.
    pub fn recommend(&self, config: &PipelineConfig) -> Vec<Subgroup> {
        let engine = self.cluster(config);
        let mut subgroups = SubgroupPartitioner::new(config.partition).partition(&engine);

        let sizes: Vec<usize> = subgroups.iter().map(Subgroup::len).collect();
        tracing::info!(
            subgroups = subgroups.len(),
            sizes = ?sizes,
            "partitioned excursion group"
        );

        let builder = PoiRecommendationBuilder::new(config.builder, config.mining);
        build_all(&builder, &mut subgroups);
        subgroups
    }
}

#[cfg(feature = "parallel")]
fn build_all(builder: &PoiRecommendationBuilder, subgroups: &mut [Subgroup]) {
    use rayon::prelude::*;

    subgroups
        .par_iter_mut()
        .for_each(|subgroup| builder.build(subgroup));
}

#[cfg(not(feature = "parallel"))]
fn build_all(builder: &PoiRecommendationBuilder, subgroups: &mut [Subgroup]) {
    for subgroup in subgroups.iter_mut() {
        builder.build(subgroup);
    }
}
