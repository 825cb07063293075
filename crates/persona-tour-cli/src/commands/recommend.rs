use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use persona_tour_application::RecommendationUseCase;
use persona_tour_infrastructure::{FileProfileRepository, load_pipeline_config};

use super::utils::print_json;

fn build_use_case(profiles: &Path, config: Option<&Path>) -> Result<RecommendationUseCase> {
    let config = load_pipeline_config(config).context("Failed to load pipeline config")?;
    let repository = FileProfileRepository::new(profiles)
        .with_context(|| format!("Cannot use profile file {}", profiles.display()))?;

    RecommendationUseCase::new(Arc::new(repository), config)
        .context("Invalid pipeline configuration")
}

pub async fn recommend(profiles: &Path, config: Option<&Path>) -> Result<()> {
    let report = build_use_case(profiles, config)?
        .recommend()
        .await
        .context("Recommendation failed")?;
    tracing::info!(subgroups = report.subgroups.len(), "recommendation ready");
    print_json(&report)
}

pub async fn reduced(profiles: &Path, config: Option<&Path>) -> Result<()> {
    let report = build_use_case(profiles, config)?
        .recommend_reduced()
        .await
        .context("Reduced recommendation failed")?;
    print_json(&report)
}

pub async fn rules(profiles: &Path, config: Option<&Path>) -> Result<()> {
    let summaries = build_use_case(profiles, config)?
        .rules_report()
        .await
        .context("Rule mining failed")?;
    print_json(&summaries)
}
