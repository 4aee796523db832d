use thiserror::Error;

use crate::constants::GENERIC_SERVICE_FAILURE;
use crate::models::RecommendedItem;

/// Why a submission did not produce recommendations.
///
/// `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationFailure {
    /// The service could not be reached at all.
    #[error(
        "Unable to connect to the server. Please make sure the backend server is running at {endpoint}."
    )]
    Connectivity { endpoint: String, detail: String },

    /// The service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("No recommendations found for the given nutritional values.")]
    EmptyResult,

    /// The service answered 2xx but the body was not a recipe list.
    #[error("Failed to get recommendations. Please try again later.")]
    Malformed { detail: String },
}

impl RecommendationFailure {
    /// Service failure using the service's own message when it sent one.
    pub fn service(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_SERVICE_FAILURE.to_string());
        RecommendationFailure::Service { status, message }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, RecommendationFailure::Connectivity { .. })
    }
}

/// What the recommendation flow currently shows. Exactly one state holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Pending,
    Success(Vec<RecommendedItem>),
    Failure(RecommendationFailure),
}

impl RequestOutcome {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestOutcome::Pending)
    }

    pub fn items(&self) -> Option<&[RecommendedItem]> {
        match self {
            RequestOutcome::Success(items) => Some(items),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&RecommendationFailure> {
        match self {
            RequestOutcome::Failure(reason) => Some(reason),
            _ => None,
        }
    }

    /// Short state name for logs.
    pub fn state_name(&self) -> &'static str {
        match self {
            RequestOutcome::Idle => "idle",
            RequestOutcome::Pending => "pending",
            RequestOutcome::Success(_) => "success",
            RequestOutcome::Failure(_) => "failure",
        }
    }
}
