pub mod questionnaire;
pub mod recommend;
pub mod utils;
