mod outcome;

pub use outcome::{RecommendationFailure, RequestOutcome};
