//! Recommendation client: builds requests, talks to the service through a
//! [`RecommendationTransport`], and owns the single [`RequestOutcome`] slot.
//!
//! Only one request can be in flight. A submission is split into three
//! steps so an event loop can drive it:
//!
//! 1. [`RecommendationClient::begin`] moves the slot to `Pending` and hands
//!    out a [`PendingRequest`] ticket.
//! 2. [`RecommendationClient::dispatch`] returns a detached future that
//!    performs the network call. It holds no borrow of the client, so it can
//!    be spawned while the client keeps handling events.
//! 3. [`RecommendationClient::complete`] stores the result, unless the
//!    ticket was invalidated in the meantime by [`RecommendationClient::abandon`].
//!
//! [`RecommendationClient::submit`] runs all three in sequence.

mod transport;

pub use transport::{
    HealthStatus, HttpTransport, RecommendationTransport, ScriptedTransport, TransportError,
    TransportResponse,
};

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{NutritionError, Result};
use crate::models::{NutritionPreference, RecommendationRequest, RecommendedItem};
use crate::state::{RecommendationFailure, RequestOutcome};

/// Ticket for a submission that has entered `Pending`.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    generation: u64,
    request: RecommendationRequest,
}

impl PendingRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &RecommendationRequest {
        &self.request
    }
}

/// Result of a dispatched request, not yet applied to the outcome slot.
#[derive(Debug, Clone)]
pub struct Completion {
    generation: u64,
    result: std::result::Result<Vec<RecommendedItem>, RecommendationFailure>,
}

impl Completion {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> &std::result::Result<Vec<RecommendedItem>, RecommendationFailure> {
        &self.result
    }
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    error: Option<String>,
}

/// Turn a service response into recipes or a failure.
///
/// An empty (or `null`) list is a failure, never an empty success.
pub fn classify_response(
    status: u16,
    body: &str,
) -> std::result::Result<Vec<RecommendedItem>, RecommendationFailure> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ServiceErrorBody>(body)
            .ok()
            .and_then(|b| b.error);
        return Err(RecommendationFailure::service(status, message));
    }

    match serde_json::from_str::<Option<Vec<RecommendedItem>>>(body) {
        Ok(Some(items)) if !items.is_empty() => Ok(items),
        Ok(_) => Err(RecommendationFailure::EmptyResult),
        Err(e) => Err(RecommendationFailure::Malformed {
            detail: e.to_string(),
        }),
    }
}

/// Classify a response whose status arrived but whose body could not be read.
///
/// The service was reached, so this is never a connectivity failure.
pub fn classify_unreadable_body(
    status: u16,
    detail: String,
) -> std::result::Result<Vec<RecommendedItem>, RecommendationFailure> {
    if (200..300).contains(&status) {
        Err(RecommendationFailure::Malformed { detail })
    } else {
        Err(RecommendationFailure::service(status, None))
    }
}

/// Drives the recommendation flow's state machine over a transport.
#[derive(Debug)]
pub struct RecommendationClient<T> {
    transport: Arc<T>,
    outcome: RequestOutcome,
    generation: u64,
}

impl<T: RecommendationTransport + 'static> RecommendationClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            outcome: RequestOutcome::Idle,
            generation: 0,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    /// Enter `Pending` for a fresh request built from `prefs`.
    ///
    /// Any previous result or diagnostic is cleared. Fails with
    /// `RequestInProgress` while another request is pending.
    pub fn begin(&mut self, prefs: &NutritionPreference) -> Result<PendingRequest> {
        if self.outcome.is_pending() {
            warn!(generation = self.generation, "submission rejected, request in flight");
            return Err(NutritionError::RequestInProgress);
        }

        self.generation += 1;
        self.outcome = RequestOutcome::Pending;

        Ok(PendingRequest {
            generation: self.generation,
            request: RecommendationRequest::from_preferences(prefs),
        })
    }

    /// Send the ticket's request and classify the answer.
    ///
    /// The returned future owns a handle to the transport, so it may be
    /// spawned and awaited after further calls on the client.
    pub fn dispatch(
        &self,
        pending: PendingRequest,
    ) -> impl Future<Output = Completion> + Send + use<T> {
        let transport = Arc::clone(&self.transport);

        async move {
            info!(
                generation = pending.generation,
                values = ?pending.request.nutrition_values(),
                "requesting recommendations"
            );

            let result = match transport.post_recommendations(&pending.request).await {
                Ok(TransportResponse {
                    status,
                    body: Ok(body),
                }) => {
                    debug!(status, bytes = body.len(), "service responded");
                    classify_response(status, &body)
                }
                Ok(TransportResponse {
                    status,
                    body: Err(detail),
                }) => {
                    warn!(status, %detail, "service response body could not be read");
                    classify_unreadable_body(status, detail)
                }
                Err(e) => Err(RecommendationFailure::Connectivity {
                    endpoint: e.endpoint,
                    detail: e.detail,
                }),
            };

            match &result {
                Ok(items) => info!(count = items.len(), "recommendations received"),
                Err(failure) => warn!(?failure, "recommendation request failed"),
            }

            Completion {
                generation: pending.generation,
                result,
            }
        }
    }

    /// Store a completion in the outcome slot.
    ///
    /// Returns `false` and leaves the slot untouched when the completion
    /// belongs to an abandoned or superseded request.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation || !self.outcome.is_pending() {
            debug!(
                generation = completion.generation,
                current = self.generation,
                "discarding stale completion"
            );
            return false;
        }

        self.outcome = match completion.result {
            Ok(items) => RequestOutcome::Success(items),
            Err(failure) => RequestOutcome::Failure(failure),
        };
        debug!(
            generation = completion.generation,
            state = self.outcome.state_name(),
            "outcome updated"
        );
        true
    }

    /// Drop any pending request and go back to `Idle`.
    ///
    /// Completions for earlier tickets are ignored afterwards.
    pub fn abandon(&mut self) {
        if self.outcome.is_pending() {
            self.generation += 1;
        }
        self.outcome = RequestOutcome::Idle;
    }

    /// Begin, dispatch and complete a request for `prefs`.
    pub async fn submit(&mut self, prefs: &NutritionPreference) -> Result<&RequestOutcome> {
        let pending = self.begin(prefs)?;
        let completion = self.dispatch(pending).await;
        self.complete(completion);
        Ok(&self.outcome)
    }
}
