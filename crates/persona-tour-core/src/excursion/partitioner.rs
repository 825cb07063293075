//! Splits a clustered excursion group into subgroups.

use crate::clustering::ClusteringEngine;
use crate::config::PartitionSettings;
use crate::profile::PersonalityProfile;

use super::subgroup::{Subgroup, SubgroupOrigin};

/// Turns clusters into excursion-sized subgroups.
///
/// The result is ordered by the first appearance of each seeding cluster in
/// the engine's profile order, so identical input gives identical output.
#[derive(Debug, Clone, Copy)]
pub struct SubgroupPartitioner {
    settings: PartitionSettings,
}

impl SubgroupPartitioner {
    pub fn new(settings: PartitionSettings) -> Self {
        Self { settings }
    }

    /// Partitions every profile held by `engine` into non-empty subgroups.
    pub fn partition(&self, engine: &ClusteringEngine) -> Vec<Subgroup> {
        let profiles = engine.profiles();
        if profiles.is_empty() {
            return Vec::new();
        }
        if profiles.len() < self.settings.min_group_size {
            return vec![Subgroup::new(SubgroupOrigin::WholeGroup, profiles.to_vec())];
        }

        let assignments = engine.assignments();
        let clusters = engine.clusters();

        let mut cluster_order: Vec<usize> = Vec::new();
        for &cluster in &assignments {
            if !cluster_order.contains(&cluster) {
                cluster_order.push(cluster);
            }
        }

        let is_valid = |cluster: usize| clusters[cluster].len() >= self.settings.min_cluster_size;
        let valid: Vec<usize> = cluster_order.into_iter().filter(|&c| is_valid(c)).collect();

        if valid.len() < 2 {
            tracing::debug!(
                valid_clusters = valid.len(),
                "not enough populated clusters, keeping the group whole"
            );
            return vec![Subgroup::new(SubgroupOrigin::WholeGroup, profiles.to_vec())];
        }

        let mut subgroups: Vec<Subgroup> = valid
            .iter()
            .map(|&cluster| {
                let members = members_in_input_order(profiles, &assignments, cluster);
                Subgroup::new(
                    SubgroupOrigin::Cluster {
                        centroid: clusters[cluster].centroid(),
                    },
                    members,
                )
            })
            .collect();

        let mut orphans = Vec::new();
        for (profile, &cluster) in profiles.iter().zip(&assignments) {
            if is_valid(cluster) {
                continue;
            }
            match best_subgroup(&subgroups, profile) {
                Some(best) => subgroups[best].members.push(profile.clone()),
                None => orphans.push(profile.clone()),
            }
        }

        if !orphans.is_empty() {
            tracing::warn!(
                orphans = orphans.len(),
                "no cluster subgroup could take leftover profiles, adding a fallback subgroup"
            );
            subgroups.push(Subgroup::new(SubgroupOrigin::Fallback, orphans));
        }

        subgroups.retain(|subgroup| !subgroup.is_empty());
        subgroups
    }
}

fn members_in_input_order(
    profiles: &[PersonalityProfile],
    assignments: &[usize],
    cluster: usize,
) -> Vec<PersonalityProfile> {
    profiles
        .iter()
        .zip(assignments)
        .filter(|&(_, &assigned)| assigned == cluster)
        .map(|(profile, _)| profile.clone())
        .collect()
}

/// First subgroup whose originating centroid is most similar to `profile`.
fn best_subgroup(subgroups: &[Subgroup], profile: &PersonalityProfile) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, subgroup) in subgroups.iter().enumerate() {
        if subgroup.is_empty() {
            continue;
        }
        let Some(centroid) = subgroup.origin_centroid() else {
            continue;
        };
        let similarity = profile.traits.similarity(&centroid);
        if best.is_none_or(|(_, max)| similarity > max) {
            best = Some((index, similarity));
        }
    }
    best.map(|(index, _)| index)
}
