//! Questionnaire Service
//!
//! Scores Big Five answer sheets and turns them into profiles the
//! recommendation pipeline can consume.

use persona_tour_core::Result;
use persona_tour_core::profile::PersonalityProfile;
use persona_tour_core::questionnaire::{
    OceanForm, QuestionnaireResult, profile_from_questionnaire, score_questionnaire,
};

/// Service for scoring questionnaires.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionnaireService;

impl QuestionnaireService {
    pub fn new() -> Self {
        Self
    }

    /// OCEAN scores, category scores and the two strongest categories.
    pub fn score(&self, form: &OceanForm) -> Result<QuestionnaireResult> {
        let result = score_questionnaire(form)?;
        tracing::debug!(top = ?result.top_categories, "scored questionnaire");
        Ok(result)
    }

    /// Builds a profile with normalized traits and derived category scores.
    pub fn to_profile(&self, id: u64, form: &OceanForm) -> Result<PersonalityProfile> {
        profile_from_questionnaire(id, form)
    }
}
