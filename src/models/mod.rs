pub mod preference;
pub mod recommendation;

pub use preference::{NutritionField, NutritionPreference, PreferenceModel};
pub use recommendation::{RecommendationRequest, RecommendedItem, parse_minutes};
