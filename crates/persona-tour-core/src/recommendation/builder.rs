//! Per-subgroup POI inclusion and exclusion lists.

use std::collections::BTreeMap;

use crate::config::{BuilderSettings, MiningSettings};
use crate::excursion::Subgroup;
use crate::mining::FrequentPatternMiner;
use crate::profile::CategoryCode;

/// Fills a subgroup's inclusion and exclusion lists.
///
/// The average stage decides every category somebody liked; the rule stage
/// then appends consequents of mined rules that neither list mentions yet.
/// The rule stage only ever grows the inclusion list.
#[derive(Debug, Clone, Copy)]
pub struct PoiRecommendationBuilder {
    settings: BuilderSettings,
    mining: MiningSettings,
}

impl PoiRecommendationBuilder {
    pub fn new(settings: BuilderSettings, mining: MiningSettings) -> Self {
        Self { settings, mining }
    }

    pub fn build(&self, subgroup: &mut Subgroup) {
        self.apply_averages(subgroup);
        self.apply_rules(subgroup);
    }

    /// Average stage. Replaces both lists.
    ///
    /// Only ratings at or above the average floor are averaged, and a category
    /// nobody rated that high appears in neither list.
    pub fn apply_averages(&self, subgroup: &mut Subgroup) {
        let mut totals: BTreeMap<&CategoryCode, (f64, usize)> = BTreeMap::new();
        for member in &subgroup.members {
            for (code, rating) in member.preferences.liked(self.settings.average_rating_floor) {
                let entry = totals.entry(code).or_insert((0.0, 0));
                entry.0 += rating;
                entry.1 += 1;
            }
        }

        let mut inclusion = Vec::new();
        let mut exclusion = Vec::new();
        for (code, (sum, count)) in totals {
            let mean = sum / count as f64;
            if mean >= self.settings.inclusion_threshold {
                inclusion.push(code.clone());
            } else {
                exclusion.push(code.clone());
            }
        }

        subgroup.poi_inclusion = inclusion;
        subgroup.poi_exclusion = exclusion;
    }

    /// Rule stage. Mines the subgroup with a fresh miner, records the rules
    /// and appends undecided consequents to the inclusion list.
    pub fn apply_rules(&self, subgroup: &mut Subgroup) {
        let floor = self.settings.transaction_rating_floor;
        let mut miner = FrequentPatternMiner::new(self.mining);
        miner.fit(
            subgroup
                .members
                .iter()
                .map(|member| member.liked_categories(floor)),
        );

        let mut added = 0usize;
        for rule in miner.rules() {
            for item in &rule.consequent {
                if !subgroup.poi_inclusion.contains(item) && !subgroup.poi_exclusion.contains(item) {
                    subgroup.poi_inclusion.push(item.clone());
                    added += 1;
                }
            }
        }

        tracing::debug!(
            members = subgroup.members.len(),
            rules = miner.rules().len(),
            added,
            "applied association rules"
        );
        subgroup.applied_rules = miner.into_rules();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excursion::SubgroupOrigin;
    use crate::profile::{PersonalityProfile, Preferences, TraitVector};

    fn member(id: u64, ratings: &[(&str, f64)]) -> PersonalityProfile {
        let preferences: Preferences = ratings.iter().map(|&(code, r)| (code, r)).collect();
        PersonalityProfile::new(id, TraitVector::default(), preferences)
    }

    fn codes(items: &[&str]) -> Vec<CategoryCode> {
        items.iter().map(|&item| CategoryCode::from(item)).collect()
    }

    fn group(members: Vec<PersonalityProfile>) -> Subgroup {
        Subgroup::new(SubgroupOrigin::WholeGroup, members)
    }

    #[test]
    fn test_average_stage_with_default_floors() {
        let mut subgroup = group(vec![
            member(1, &[("F1", 5.0), ("F2", 4.0), ("F3", 1.0)]),
            member(2, &[("F1", 4.0), ("F2", 2.0), ("F3", 2.0)]),
            member(3, &[("F5", 3.0)]),
        ]);

        PoiRecommendationBuilder::new(BuilderSettings::default(), MiningSettings::GROUPED)
            .apply_averages(&mut subgroup);

        assert_eq!(subgroup.poi_inclusion, codes(&["F1", "F2", "F5"]));
        // Only liked ratings are averaged, so no mean can fall below the floor.
        assert!(subgroup.poi_exclusion.is_empty());
    }

    #[test]
    fn test_average_stage_excludes_below_inclusion_threshold() {
        let settings = BuilderSettings {
            average_rating_floor: 2.0,
            inclusion_threshold: 3.5,
            ..BuilderSettings::default()
        };
        let mut subgroup = group(vec![
            member(1, &[("F1", 5.0), ("F2", 3.0), ("F9", 1.0)]),
            member(2, &[("F1", 4.0), ("F2", 2.0)]),
        ]);

        PoiRecommendationBuilder::new(settings, MiningSettings::GROUPED).apply_averages(&mut subgroup);

        assert_eq!(subgroup.poi_inclusion, codes(&["F1"]));
        assert_eq!(subgroup.poi_exclusion, codes(&["F2"]));
        for code in &subgroup.poi_inclusion {
            assert!(!subgroup.poi_exclusion.contains(code));
        }
    }

    #[test]
    fn test_rule_stage_adds_nothing_new_when_floors_match() {
        let mut subgroup = group(vec![
            member(1, &[("F1", 5.0), ("F2", 4.0)]),
            member(2, &[("F1", 4.0), ("F2", 5.0)]),
            member(3, &[("F1", 3.0), ("F4", 1.0)]),
        ]);
        let builder = PoiRecommendationBuilder::new(BuilderSettings::default(), MiningSettings::GROUPED);

        builder.apply_averages(&mut subgroup);
        let after_averages = subgroup.poi_inclusion.clone();
        builder.apply_rules(&mut subgroup);

        assert!(!subgroup.applied_rules.is_empty());
        assert_eq!(subgroup.poi_inclusion, after_averages);
    }

    #[test]
    fn test_rule_stage_can_include_categories_nobody_rated_highly() {
        // Transactions accept a 2, averages only count 3 and above.
        let settings = BuilderSettings {
            transaction_rating_floor: 2.0,
            ..BuilderSettings::default()
        };
        let mut subgroup = group(vec![
            member(1, &[("F1", 5.0), ("F6", 2.0)]),
            member(2, &[("F1", 4.0), ("F6", 2.0)]),
            member(3, &[("F1", 4.0), ("F6", 2.5)]),
        ]);

        PoiRecommendationBuilder::new(settings, MiningSettings::GROUPED).build(&mut subgroup);

        assert_eq!(subgroup.poi_inclusion, codes(&["F1", "F6"]));
        assert!(subgroup.poi_exclusion.is_empty());
        assert!(
            subgroup
                .applied_rules
                .iter()
                .any(|r| r.consequent.contains(&CategoryCode::from("F6")))
        );
    }

    #[test]
    fn test_rule_stage_never_touches_exclusion() {
        let settings = BuilderSettings {
            average_rating_floor: 2.0,
            inclusion_threshold: 3.5,
            transaction_rating_floor: 2.0,
        };
        let mut subgroup = group(vec![
            member(1, &[("F1", 5.0), ("F2", 2.0)]),
            member(2, &[("F1", 5.0), ("F2", 3.0)]),
        ]);

        PoiRecommendationBuilder::new(settings, MiningSettings::GROUPED).build(&mut subgroup);

        assert_eq!(subgroup.poi_exclusion, codes(&["F2"]));
        assert_eq!(subgroup.poi_inclusion, codes(&["F1"]));
        assert!(
            subgroup
                .applied_rules
                .iter()
                .any(|r| r.consequent.contains(&CategoryCode::from("F2")))
        );
    }

    #[test]
    fn test_members_without_liked_categories() {
        let mut subgroup = group(vec![member(1, &[("F1", 1.0)]), member(2, &[])]);

        PoiRecommendationBuilder::new(BuilderSettings::default(), MiningSettings::GROUPED)
            .build(&mut subgroup);

        assert!(subgroup.poi_inclusion.is_empty());
        assert!(subgroup.poi_exclusion.is_empty());
        assert!(subgroup.applied_rules.is_empty());
    }
}
