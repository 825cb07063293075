//! Application layer for Persona Tour.
//!
//! This crate provides use case implementations that coordinate between
//! the domain core and infrastructure-provided profile sources.

pub mod questionnaire_service;
pub mod recommendation_usecase;
pub mod report;

pub use questionnaire_service::QuestionnaireService;
pub use recommendation_usecase::RecommendationUseCase;
pub use report::{RecommendationReport, ReducedReport, RuleSummary, RuleView, SubgroupReport};
