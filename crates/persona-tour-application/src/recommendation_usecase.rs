//! Recommendation use cases.
//!
//! Fetches the current profile set, runs the analytical pipeline from
//! scratch and shapes the result for presentation.

use std::sync::Arc;

use persona_tour_core::Result;
use persona_tour_core::config::{MiningSettings, PipelineConfig};
use persona_tour_core::excursion::{ExcursionGroup, Subgroup};
use persona_tour_core::profile::ProfileRepository;
use persona_tour_core::recommendation::recommend_without_clustering;

use crate::report::{RecommendationReport, ReducedReport, RuleSummary, SubgroupReport};

/// Use case for generating POI recommendations for the stored tourists.
pub struct RecommendationUseCase {
    profile_repository: Arc<dyn ProfileRepository>,
    config: PipelineConfig,
}

impl RecommendationUseCase {
    /// Creates a new use case. The config is validated up front.
    pub fn new(profile_repository: Arc<dyn ProfileRepository>, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            profile_repository,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clusters, partitions and builds POI lists for every subgroup.
    pub async fn recommend(&self) -> Result<RecommendationReport> {
        let (profile_count, subgroups) = self.run_pipeline().await?;

        Ok(RecommendationReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            profile_count,
            subgroups: subgroups
                .iter()
                .enumerate()
                .map(|(position, subgroup)| SubgroupReport::from_subgroup(position, subgroup))
                .collect(),
        })
    }

    /// Mines the whole group at once with the reduced-path thresholds.
    pub async fn recommend_reduced(&self) -> Result<ReducedReport> {
        let profiles = self.profile_repository.get_all().await?;
        let result = recommend_without_clustering(
            &profiles,
            MiningSettings::REDUCED,
            self.config.builder.transaction_rating_floor,
        );

        Ok(ReducedReport::new(
            chrono::Utc::now().to_rfc3339(),
            profiles.len(),
            &result,
        ))
    }

    /// Lists the association rules mined for every subgroup.
    pub async fn rules_report(&self) -> Result<Vec<RuleSummary>> {
        let (_, subgroups) = self.run_pipeline().await?;
        Ok(subgroups
            .iter()
            .enumerate()
            .map(|(position, subgroup)| RuleSummary::from_subgroup(position, subgroup))
            .collect())
    }

    async fn run_pipeline(&self) -> Result<(usize, Vec<Subgroup>)> {
        let profiles = self.profile_repository.get_all().await?;
        let profile_count = profiles.len();
        tracing::info!(profile_count, "running recommendation pipeline");

        let subgroups = ExcursionGroup::new(profiles).recommend(&self.config);
        Ok((profile_count, subgroups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_tour_core::TourError;
    use persona_tour_core::profile::{CategoryCode, PersonalityProfile, Preferences, TraitVector};

    struct MockProfileRepository {
        profiles: Vec<PersonalityProfile>,
    }

    #[async_trait::async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn get_all(&self) -> Result<Vec<PersonalityProfile>> {
            Ok(self.profiles.clone())
        }
    }

    struct FailingProfileRepository;

    #[async_trait::async_trait]
    impl ProfileRepository for FailingProfileRepository {
        async fn get_all(&self) -> Result<Vec<PersonalityProfile>> {
            Err(TourError::io("profile store unavailable"))
        }
    }

    fn profile(id: u64, traits: [f64; 5], ratings: &[(&str, f64)]) -> PersonalityProfile {
        let preferences: Preferences = ratings.iter().map(|&(code, r)| (code, r)).collect();
        PersonalityProfile::new(id, TraitVector::from_array(traits), preferences)
    }

    fn use_case(profiles: Vec<PersonalityProfile>) -> RecommendationUseCase {
        RecommendationUseCase::new(
            Arc::new(MockProfileRepository { profiles }),
            PipelineConfig::default(),
        )
        .unwrap()
    }

    fn trio() -> Vec<PersonalityProfile> {
        vec![
            profile(1, [0.9, 0.1, 0.9, 0.2, 0.1], &[("F1", 5.0), ("F2", 4.0)]),
            profile(2, [0.85, 0.15, 0.88, 0.25, 0.12], &[("F1", 4.0), ("F2", 5.0)]),
            profile(3, [0.1, 0.9, 0.1, 0.9, 0.9], &[("F5", 5.0)]),
        ]
    }

    #[tokio::test]
    async fn test_recommend_reports_rounded_rules() {
        let report = use_case(trio()).recommend().await.unwrap();

        assert_eq!(report.profile_count, 3);
        assert_eq!(report.subgroups.len(), 1);

        let subgroup = &report.subgroups[0];
        assert_eq!(subgroup.label, "Subgroup_1");
        assert_eq!(subgroup.members, vec![1, 2, 3]);
        assert_eq!(
            subgroup.poi_inclusion,
            vec![CategoryCode::from("F1"), CategoryCode::from("F2"), CategoryCode::from("F5")]
        );
        for rule in &subgroup.applied_rules {
            assert_eq!(rule.support, 0.67);
            assert_eq!(rule.confidence, 1.0);
        }
    }

    #[tokio::test]
    async fn test_recommend_with_no_profiles() {
        let report = use_case(Vec::new()).recommend().await.unwrap();
        assert_eq!(report.profile_count, 0);
        assert!(report.subgroups.is_empty());
    }

    #[tokio::test]
    async fn test_reduced_path_uses_reduced_thresholds() {
        let report = use_case(trio()).recommend_reduced().await.unwrap();
        assert_eq!(report.profile_count, 3);
        assert_eq!(
            report.poi_inclusion.len(),
            2,
            "F1 and F2 imply each other, F5 only appears once"
        );
        assert_eq!(report.applied_rules.len(), 2);
    }

    #[tokio::test]
    async fn test_rules_report() {
        let summaries = use_case(trio()).rules_report().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].num_rules, 2);
        assert!(summaries[0].rules.contains(&"{F1} => {F2}".to_string()));
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let use_case =
            RecommendationUseCase::new(Arc::new(FailingProfileRepository), PipelineConfig::default())
                .unwrap();
        assert!(use_case.recommend().await.unwrap_err().is_io());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = PipelineConfig::default();
        config.mining.min_confidence = -0.1;
        let result = RecommendationUseCase::new(Arc::new(FailingProfileRepository), config);
        assert!(result.is_err());
    }
}
