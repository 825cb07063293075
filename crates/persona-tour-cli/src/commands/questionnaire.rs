use std::path::Path;

use anyhow::{Context, Result};
use persona_tour_application::QuestionnaireService;
use persona_tour_core::questionnaire::OceanForm;

use super::utils::print_json;

pub async fn score(form_path: &Path, profile_id: Option<u64>) -> Result<()> {
    let content = tokio::fs::read_to_string(form_path)
        .await
        .with_context(|| format!("Failed to read answer sheet {}", form_path.display()))?;
    let form: OceanForm = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse answer sheet {}", form_path.display()))?;

    let service = QuestionnaireService::new();
    match profile_id {
        Some(id) => print_json(&service.to_profile(id, &form)?),
        None => print_json(&service.score(&form)?),
    }
}
