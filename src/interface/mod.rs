pub mod prompts;
pub mod render;

pub use prompts::{adjust_preferences, prompt_field, prompt_yes_no};
pub use render::{
    Diagnostic, OutcomeView, RecommendationCard, display_fields, display_outcome, present,
};
