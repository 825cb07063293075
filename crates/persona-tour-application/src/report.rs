//! Presentation reports.
//!
//! The core keeps full-precision metrics; reports round them to two decimals
//! for callers.

use serde::Serialize;

use persona_tour_core::excursion::{Subgroup, SubgroupOrigin};
use persona_tour_core::mining::AssociationRule;
use persona_tour_core::profile::CategoryCode;
use persona_tour_core::recommendation::ReducedRecommendation;

/// Rounds a metric for display.
pub fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One association rule as shown to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleView {
    pub antecedent: Vec<CategoryCode>,
    pub consequent: Vec<CategoryCode>,
    pub support: f64,
    pub confidence: f64,
}

impl From<&AssociationRule> for RuleView {
    fn from(rule: &AssociationRule) -> Self {
        Self {
            antecedent: rule.antecedent.iter().cloned().collect(),
            consequent: rule.consequent.iter().cloned().collect(),
            support: round_for_display(rule.support),
            confidence: round_for_display(rule.confidence),
        }
    }
}

/// POI lists of one subgroup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubgroupReport {
    /// 1-based position in pipeline output order.
    pub index: usize,
    /// `Subgroup_<index>`
    pub label: String,
    pub origin: SubgroupOrigin,
    pub members: Vec<u64>,
    pub poi_inclusion: Vec<CategoryCode>,
    pub poi_exclusion: Vec<CategoryCode>,
    pub applied_rules: Vec<RuleView>,
}

impl SubgroupReport {
    pub fn from_subgroup(position: usize, subgroup: &Subgroup) -> Self {
        let index = position + 1;
        Self {
            index,
            label: format!("Subgroup_{index}"),
            origin: subgroup.origin,
            members: subgroup.member_ids(),
            poi_inclusion: subgroup.poi_inclusion.clone(),
            poi_exclusion: subgroup.poi_exclusion.clone(),
            applied_rules: subgroup.applied_rules.iter().map(RuleView::from).collect(),
        }
    }
}

/// Result of the grouped recommendation use case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub profile_count: usize,
    pub subgroups: Vec<SubgroupReport>,
}

/// Result of the non-clustered use case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReducedReport {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub profile_count: usize,
    pub poi_inclusion: Vec<CategoryCode>,
    pub applied_rules: Vec<RuleView>,
}

impl ReducedReport {
    pub fn new(generated_at: String, profile_count: usize, result: &ReducedRecommendation) -> Self {
        Self {
            generated_at,
            profile_count,
            poi_inclusion: result.poi_inclusion.clone(),
            applied_rules: result.rules.iter().map(RuleView::from).collect(),
        }
    }
}

/// Rules mined for one subgroup, rendered as `{A, B} => {C}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub subgroup_index: usize,
    pub num_rules: usize,
    pub rules: Vec<String>,
}

impl RuleSummary {
    pub fn from_subgroup(position: usize, subgroup: &Subgroup) -> Self {
        Self {
            subgroup_index: position + 1,
            num_rules: subgroup.applied_rules.len(),
            rules: subgroup.applied_rules.iter().map(ToString::to_string).collect(),
        }
    }
}
