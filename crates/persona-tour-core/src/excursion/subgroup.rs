//! Subgroup domain model.

use serde::Serialize;

use crate::mining::AssociationRule;
use crate::profile::{CategoryCode, PersonalityProfile, TraitVector};

/// Where a subgroup's membership came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubgroupOrigin {
    /// The excursion group was kept whole.
    WholeGroup,
    /// Seeded by a sufficiently populated cluster.
    Cluster {
        /// Centroid of the originating cluster at partition time.
        centroid: TraitVector,
    },
    /// Profiles that could not be attached to any cluster subgroup.
    Fallback,
}

/// A non-empty slice of the excursion group with its POI decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgroup {
    pub origin: SubgroupOrigin,
    pub members: Vec<PersonalityProfile>,
    pub poi_inclusion: Vec<CategoryCode>,
    pub poi_exclusion: Vec<CategoryCode>,
    /// Rules mined for this subgroup, in mining order.
    pub applied_rules: Vec<AssociationRule>,
}

impl Subgroup {
    pub fn new(origin: SubgroupOrigin, members: Vec<PersonalityProfile>) -> Self {
        Self {
            origin,
            members,
            poi_inclusion: Vec::new(),
            poi_exclusion: Vec::new(),
            applied_rules: Vec::new(),
        }
    }

    pub fn member_ids(&self) -> Vec<u64> {
        self.members.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Centroid used when attaching leftover profiles: only cluster-seeded
    /// subgroups carry one.
    pub fn origin_centroid(&self) -> Option<TraitVector> {
        match self.origin {
            SubgroupOrigin::Cluster { centroid } => Some(centroid),
            SubgroupOrigin::WholeGroup | SubgroupOrigin::Fallback => None,
        }
    }
}
