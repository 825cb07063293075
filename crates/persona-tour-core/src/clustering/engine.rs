//! Incremental similarity clustering over personality trait vectors.

use serde::Serialize;

use crate::config::ClusteringSettings;
use crate::profile::{PersonalityProfile, TraitVector};

/// A group of profiles with similar personalities.
///
/// Members are indices into the owning engine's profile list. The centroid
/// always equals the mean trait vector of the current members once the
/// engine returns control to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    centroid: TraitVector,
    members: Vec<usize>,
}

impl Cluster {
    fn singleton(index: usize, traits: TraitVector) -> Self {
        Self {
            centroid: traits,
            members: vec![index],
        }
    }

    pub fn centroid(&self) -> TraitVector {
        self.centroid
    }

    /// Indices of member profiles in ingestion order of this pass.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Outcome of the most recent refinement loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RefinementStats {
    /// Number of reassignment passes that ran.
    pub iterations: usize,
    /// False when the loop stopped at the iteration cap.
    pub converged: bool,
}

/// Groups profiles by personality proximity.
///
/// Each request builds its own engine; the engine exclusively owns the
/// profiles it has seen and the cluster set derived from them.
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    settings: ClusteringSettings,
    profiles: Vec<PersonalityProfile>,
    clusters: Vec<Cluster>,
    last_refinement: RefinementStats,
}

impl ClusteringEngine {
    pub fn new(settings: ClusteringSettings) -> Self {
        Self {
            settings,
            profiles: Vec::new(),
            clusters: Vec::new(),
            last_refinement: RefinementStats::default(),
        }
    }

    /// Builds an engine and ingests every profile in order.
    pub fn fit<I>(settings: ClusteringSettings, profiles: I) -> Self
    where
        I: IntoIterator<Item = PersonalityProfile>,
    {
        let mut engine = Self::new(settings);
        for profile in profiles {
            engine.ingest(profile);
        }
        engine
    }

    /// Adds one profile, then re-evaluates every profile seen so far.
    pub fn ingest(&mut self, profile: PersonalityProfile) {
        let index = self.profiles.len();
        let traits = profile.traits;
        self.profiles.push(profile);

        match self.nearest_cluster(&traits) {
            Some(best) => {
                self.clusters[best].members.push(index);
                self.recompute_centroid(best);
            }
            None => self.clusters.push(Cluster::singleton(index, traits)),
        }

        self.last_refinement = self.refine();
    }

    pub fn settings(&self) -> &ClusteringSettings {
        &self.settings
    }

    pub fn profiles(&self) -> &[PersonalityProfile] {
        &self.profiles
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn last_refinement(&self) -> RefinementStats {
        self.last_refinement
    }

    /// Cluster index of every profile, indexed like [`Self::profiles`].
    pub fn assignments(&self) -> Vec<usize> {
        let mut assignments = vec![usize::MAX; self.profiles.len()];
        for (cluster_index, cluster) in self.clusters.iter().enumerate() {
            for &member in &cluster.members {
                assignments[member] = cluster_index;
            }
        }
        assignments
    }

    /// Member profiles of one cluster.
    pub fn members_of(&self, cluster: usize) -> impl Iterator<Item = &PersonalityProfile> {
        self.clusters[cluster]
            .members
            .iter()
            .map(move |&index| &self.profiles[index])
    }

    /// First cluster reaching the maximum similarity, if that maximum meets
    /// the threshold. Ties keep the earlier cluster, so results depend on
    /// cluster order and stay reproducible.
    fn nearest_cluster(&self, traits: &TraitVector) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, cluster) in self.clusters.iter().enumerate() {
            let similarity = traits.similarity(&cluster.centroid);
            if similarity < self.settings.similarity_threshold {
                continue;
            }
            if best.is_none_or(|(_, max)| similarity > max) {
                best = Some((index, similarity));
            }
        }
        best.map(|(index, _)| index)
    }

    fn recompute_centroid(&mut self, cluster: usize) {
        let mean = TraitVector::mean(
            self.clusters[cluster]
                .members
                .iter()
                .map(|&i| &self.profiles[i].traits),
        );
        // Empty clusters are dropped before recomputation, so `None` never
        // overwrites a live centroid.
        if let Some(centroid) = mean {
            self.clusters[cluster].centroid = centroid;
        }
    }

    fn refine(&mut self) -> RefinementStats {
        let ClusteringSettings {
            max_iterations,
            tolerance,
            ..
        } = self.settings;

        for iteration in 1..=max_iterations {
            let previous: Vec<TraitVector> = self.clusters.iter().map(|c| c.centroid).collect();

            let order: Vec<usize> = self
                .clusters
                .iter_mut()
                .flat_map(|cluster| std::mem::take(&mut cluster.members))
                .collect();

            for index in order {
                let traits = self.profiles[index].traits;
                match self.nearest_cluster(&traits) {
                    Some(best) => self.clusters[best].members.push(index),
                    None => self.clusters.push(Cluster::singleton(index, traits)),
                }
            }

            let before_drop = self.clusters.len();
            self.clusters.retain(|cluster| !cluster.members.is_empty());
            if self.clusters.len() != before_drop {
                tracing::debug!(
                    iteration,
                    dropped = before_drop - self.clusters.len(),
                    "dropped empty clusters"
                );
            }

            for cluster in 0..self.clusters.len() {
                self.recompute_centroid(cluster);
            }

            let moved = previous.len() != self.clusters.len()
                || previous
                    .iter()
                    .zip(&self.clusters)
                    .any(|(old, cluster)| old.max_component_delta(&cluster.centroid) > tolerance);

            if !moved {
                return RefinementStats {
                    iterations: iteration,
                    converged: true,
                };
            }
        }

        tracing::debug!(
            max_iterations,
            clusters = self.clusters.len(),
            "refinement stopped at the iteration cap"
        );
        RefinementStats {
            iterations: max_iterations,
            converged: false,
        }
    }
}
