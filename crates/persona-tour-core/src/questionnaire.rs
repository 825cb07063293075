//! Questionnaire scoring.
//!
//! Turns the fifteen-item Big Five answer sheet into OCEAN scores on the
//! 1..5 answer scale, and those scores into per-category preference scores
//! `F1`..`F11`. This arithmetic sits outside the clustering pipeline; it is
//! how profiles are produced for it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TourError};
use crate::profile::{CategoryCode, PersonalityProfile, Preferences, TraitVector};

const MIN_ANSWER: u8 = 1;
const MAX_ANSWER: u8 = 5;

/// Answers on a 1..5 agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OceanForm {
    pub silence_in_conversations: u8,
    pub leadership_in_groups: u8,
    pub daily_energy: u8,
    pub empathy: u8,
    pub harsh_expression: u8,
    pub optimism_with_people: u8,
    pub difficulty_with_organization: u8,
    pub ease_to_start_tasks: u8,
    pub reliability: u8,
    pub multitasking_concern: u8,
    pub lack_of_energy: u8,
    pub calmness: u8,
    pub interest_in_arts: u8,
    pub low_interest_in_abstract_ideas: u8,
    pub creativity: u8,
}

impl OceanForm {
    fn answers(&self) -> [(&'static str, u8); 15] {
        [
            ("silenceInConversations", self.silence_in_conversations),
            ("leadershipInGroups", self.leadership_in_groups),
            ("dailyEnergy", self.daily_energy),
            ("empathy", self.empathy),
            ("harshExpression", self.harsh_expression),
            ("optimismWithPeople", self.optimism_with_people),
            ("difficultyWithOrganization", self.difficulty_with_organization),
            ("easeToStartTasks", self.ease_to_start_tasks),
            ("reliability", self.reliability),
            ("multitaskingConcern", self.multitasking_concern),
            ("lackOfEnergy", self.lack_of_energy),
            ("calmness", self.calmness),
            ("interestInArts", self.interest_in_arts),
            ("lowInterestInAbstractIdeas", self.low_interest_in_abstract_ideas),
            ("creativity", self.creativity),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        let problems: Vec<TourError> = self
            .answers()
            .iter()
            .filter(|(_, answer)| !(MIN_ANSWER..=MAX_ANSWER).contains(answer))
            .map(|(name, answer)| {
                TourError::questionnaire(format!(
                    "{name} must be between {MIN_ANSWER} and {MAX_ANSWER}, got {answer}"
                ))
            })
            .collect();

        match TourError::from_many(problems) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Big Five scores on the 1..5 answer scale, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OceanScores {
    #[serde(rename = "O")]
    pub openness: f64,
    #[serde(rename = "C")]
    pub conscientiousness: f64,
    #[serde(rename = "E")]
    pub extraversion: f64,
    #[serde(rename = "A")]
    pub agreeableness: f64,
    #[serde(rename = "N")]
    pub neuroticism: f64,
}

impl OceanScores {
    pub fn from_form(form: &OceanForm) -> Result<Self> {
        form.validate()?;

        let value = |answer: u8| f64::from(answer);
        let reversed = |answer: u8| 6.0 - f64::from(answer);
        let facet = |a: f64, b: f64, c: f64| round2((a + b + c) / 3.0);

        Ok(Self {
            extraversion: facet(
                reversed(form.silence_in_conversations),
                value(form.leadership_in_groups),
                value(form.daily_energy),
            ),
            agreeableness: facet(
                value(form.empathy),
                reversed(form.harsh_expression),
                value(form.optimism_with_people),
            ),
            conscientiousness: facet(
                reversed(form.difficulty_with_organization),
                value(form.ease_to_start_tasks),
                value(form.reliability),
            ),
            neuroticism: facet(
                value(form.multitasking_concern),
                value(form.lack_of_energy),
                reversed(form.calmness),
            ),
            openness: facet(
                value(form.interest_in_arts),
                reversed(form.low_interest_in_abstract_ideas),
                value(form.creativity),
            ),
        })
    }

    /// Maps the 1..5 scale onto the unit range the clustering engine expects.
    pub fn normalized(&self) -> TraitVector {
        let unit = |score: f64| ((score - 1.0) / 4.0).clamp(0.0, 1.0);
        TraitVector::new(
            unit(self.openness),
            unit(self.conscientiousness),
            unit(self.extraversion),
            unit(self.agreeableness),
            unit(self.neuroticism),
        )
    }

    /// Preference score of every category, rounded to two decimals.
    pub fn category_scores(&self) -> Preferences {
        CATEGORY_WEIGHTS
            .iter()
            .map(|weights| (weights.code, round2(weights.score(self))))
            .collect()
    }
}

/// Linear model of one category: `(Σ weight·trait + offset) / scale`.
struct CategoryWeights {
    code: &'static str,
    o: f64,
    c: f64,
    e: f64,
    a: f64,
    n: f64,
    offset: f64,
    scale: f64,
}

impl CategoryWeights {
    fn score(&self, ocean: &OceanScores) -> f64 {
        let weighted = self.o * ocean.openness
            + self.c * ocean.conscientiousness
            + self.e * ocean.extraversion
            + self.a * ocean.agreeableness
            + self.n * ocean.neuroticism;
        (weighted + self.offset) / self.scale
    }
}

#[rustfmt::skip]
const CATEGORY_WEIGHTS: [CategoryWeights; 11] = [
    CategoryWeights { code: "F1",  o:  0.0,   c: -0.32,  e: 0.715, a:  0.0,   n: 0.0,   offset: 0.32,  scale: 0.715 + 0.32 },
    CategoryWeights { code: "F2",  o:  0.0,   c: -0.223, e: 0.404, a:  0.573, n: 0.0,   offset: 0.223, scale: 0.977 + 0.223 },
    CategoryWeights { code: "F3",  o: -0.115, c: -0.108, e: 0.751, a: -0.05,  n: 0.129, offset: 0.273, scale: 0.88 + 0.273 },
    CategoryWeights { code: "F4",  o: -0.232, c:  0.0,   e: 0.617, a:  0.0,   n: 0.076, offset: 0.232, scale: 0.693 + 0.232 },
    CategoryWeights { code: "F5",  o:  0.078, c: -0.182, e: 0.0,   a:  0.525, n: 0.078, offset: 0.182, scale: 0.681 + 0.182 },
    CategoryWeights { code: "F6",  o: -0.204, c: -0.077, e: 0.79,  a: -0.123, n: 0.128, offset: 0.404, scale: 0.918 + 0.404 },
    CategoryWeights { code: "F7",  o:  0.0,   c:  0.0,   e: 0.0,   a:  1.0,   n: 0.0,   offset: 0.0,   scale: 1.0 },
    CategoryWeights { code: "F8",  o: -0.152, c: -0.15,  e: 0.717, a: -0.309, n: 0.0,   offset: 0.611, scale: 0.717 + 0.611 },
    CategoryWeights { code: "F9",  o: -0.116, c: -0.089, e: 0.459, a:  0.187, n: 0.0,   offset: 0.205, scale: 0.646 + 0.205 },
    CategoryWeights { code: "F10", o: -0.143, c:  0.079, e: 0.649, a: -0.168, n: 0.144, offset: 0.311, scale: 0.872 + 0.311 },
    CategoryWeights { code: "F11", o:  0.0,   c: -0.365, e: 0.336, a:  0.605, n: 0.0,   offset: 0.365, scale: 0.941 + 0.365 },
];

/// The `n` best-scored categories; ties keep category-code order.
pub fn top_categories(scores: &Preferences, n: usize) -> Vec<CategoryCode> {
    let mut ranked: Vec<(&CategoryCode, f64)> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).map(|(code, _)| code.clone()).collect()
}

/// Everything derived from one answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireResult {
    pub ocean: OceanScores,
    pub preferences: Preferences,
    pub top_categories: Vec<CategoryCode>,
}

/// Scores a form and picks the two strongest categories.
pub fn score_questionnaire(form: &OceanForm) -> Result<QuestionnaireResult> {
    let ocean = OceanScores::from_form(form)?;
    let preferences = ocean.category_scores();
    let top_categories = top_categories(&preferences, 2);
    Ok(QuestionnaireResult {
        ocean,
        preferences,
        top_categories,
    })
}

/// Builds a clustering-ready profile from an answer sheet.
pub fn profile_from_questionnaire(id: u64, form: &OceanForm) -> Result<PersonalityProfile> {
    let ocean = OceanScores::from_form(form)?;
    Ok(PersonalityProfile::new(
        id,
        ocean.normalized(),
        ocean.category_scores(),
    ))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
