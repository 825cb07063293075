//! Recommendation without clustering.

use serde::Serialize;

use crate::config::MiningSettings;
use crate::mining::{AssociationRule, FrequentPatternMiner};
use crate::profile::{CategoryCode, PersonalityProfile};

/// Result of mining the whole group at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReducedRecommendation {
    /// Union of every rule consequent, in first-seen order.
    pub poi_inclusion: Vec<CategoryCode>,
    pub rules: Vec<AssociationRule>,
}

/// Feeds every profile's liked categories straight into one miner.
pub fn recommend_without_clustering(
    profiles: &[PersonalityProfile],
    settings: MiningSettings,
    liked_threshold: f64,
) -> ReducedRecommendation {
    let mut miner = FrequentPatternMiner::new(settings);
    miner.fit(profiles.iter().map(|p| p.liked_categories(liked_threshold)));

    let mut poi_inclusion: Vec<CategoryCode> = Vec::new();
    for rule in miner.rules() {
        for item in &rule.consequent {
            if !poi_inclusion.contains(item) {
                poi_inclusion.push(item.clone());
            }
        }
    }

    tracing::info!(
        profiles = profiles.len(),
        rules = miner.rules().len(),
        included = poi_inclusion.len(),
        "reduced recommendation"
    );

    ReducedRecommendation {
        poi_inclusion,
        rules: miner.into_rules(),
    }
}
