//! Excursion groups and their subgroups.
//!
//! # Module Structure
//!
//! - `subgroup`: the `Subgroup` model and its origin
//! - `partitioner`: cluster-to-subgroup partitioning
//! - `group`: the per-request pipeline coordinator

mod group;
mod partitioner;
mod subgroup;

pub use group::ExcursionGroup;
pub use partitioner::SubgroupPartitioner;
pub use subgroup::{Subgroup, SubgroupOrigin};
