/// Number of recipes requested per submission.
pub const NB_RECOMMENDATIONS: u32 = 6;

/// Ingredient filter sent with every form submission.
pub const INGREDIENT_FILTER: &str = "";

/// Default recommendation service location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_RECOMMEND_PATH: &str = "/api/custom-nutrition";
pub const DEFAULT_HEALTH_PATH: &str = "/api/health";

/// Message used when the service fails without an `error` field.
pub const GENERIC_SERVICE_FAILURE: &str = "Failed to fetch recommendations";

/// Steps shown when the service cannot be reached.
pub const REMEDIATION_STEPS: [&str; 4] = [
    "Open a terminal",
    "Navigate to the backend directory: cd inertiafit/backend",
    "Start the Flask server: python app.py",
    "Try generating recommendations again",
];

/// Minimum Jaro-Winkler score for suggesting a field name.
pub const FIELD_SUGGESTION_THRESHOLD: f64 = 0.8;
