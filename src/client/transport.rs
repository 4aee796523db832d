use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::models::RecommendationRequest;

/// Raw answer from the service: status code and undecoded body.
///
/// `body` is `Err` with a description when the status line arrived but the
/// body could not be read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: std::result::Result<String, String>,
}

/// The service could not be reached, so there is no response to classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not reach {endpoint}: {detail}")]
pub struct TransportError {
    pub endpoint: String,
    pub detail: String,
}

/// Carries a recommendation request to the service.
#[async_trait]
pub trait RecommendationTransport: Send + Sync {
    async fn post_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// Health endpoint payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    recommend_url: Url,
    health_url: Url,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let recommend_url = base.join(&config.recommend_path)?;
        let health_url = base.join(&config.health_path)?;

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("inertiafit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint_label(&base),
            recommend_url,
            health_url,
        })
    }

    /// `host:port` of the service, as shown in connectivity messages.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn recommend_url(&self) -> &Url {
        &self.recommend_url
    }

    /// Query the service's health endpoint.
    pub async fn check_health(&self) -> Result<HealthStatus> {
        debug!(url = %self.health_url, "checking service health");
        let status = self
            .http_client
            .get(self.health_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(status)
    }

    fn unreachable(&self, err: reqwest::Error) -> TransportError {
        TransportError {
            endpoint: self.endpoint.clone(),
            detail: err.to_string(),
        }
    }
}

#[async_trait]
impl RecommendationTransport for HttpTransport {
    async fn post_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let response = self
            .http_client
            .post(self.recommend_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string());

        Ok(TransportResponse { status, body })
    }
}

fn endpoint_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or("localhost");
    match url.port_or_known_default() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// In-memory transport that replays queued answers (no network).
///
/// Every request is recorded, so callers can check what would have been sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<std::result::Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<RecommendationRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(TransportResponse {
            status,
            body: Ok(body.into()),
        }))
    }

    /// Queue a response whose body breaks off after the status line.
    pub fn truncate(self, status: u16) -> Self {
        self.push(Ok(TransportResponse {
            status,
            body: Err("connection closed before message completed".to_string()),
        }))
    }

    /// Queue a connectivity failure.
    pub fn refuse(self, endpoint: impl Into<String>) -> Self {
        self.push(Err(TransportError {
            endpoint: endpoint.into(),
            detail: "connection refused".to_string(),
        }))
    }

    fn push(self, answer: std::result::Result<TransportResponse, TransportError>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(answer);
        self
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn requests(&self) -> Vec<RecommendationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RecommendationTransport for ScriptedTransport {
    async fn post_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError {
                    endpoint: "scripted".to_string(),
                    detail: "no scripted response left".to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_config(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn test_endpoint_urls_from_config() {
        let transport = HttpTransport::new(&service_config("http://localhost:5000")).unwrap();
        assert_eq!(
            transport.recommend_url().as_str(),
            "http://localhost:5000/api/custom-nutrition"
        );
        assert_eq!(transport.endpoint(), "localhost:5000");
    }

    #[test]
    fn test_endpoint_label_uses_scheme_default_port() {
        let transport = HttpTransport::new(&service_config("https://recipes.example.com")).unwrap();
        assert_eq!(transport.endpoint(), "recipes.example.com:443");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpTransport::new(&service_config("not a url")).is_err());
    }

    #[tokio::test]
    async fn test_scripted_transport_replays_in_order() {
        let transport = ScriptedTransport::new()
            .respond(200, "[]")
            .refuse("localhost:5000")
            .truncate(500);
        let request =
            RecommendationRequest::from_preferences(&crate::models::NutritionPreference::default());

        let first = transport.post_recommendations(&request).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.body.as_deref(), Ok("[]"));

        let second = transport.post_recommendations(&request).await.unwrap_err();
        assert_eq!(second.endpoint, "localhost:5000");

        let third = transport.post_recommendations(&request).await.unwrap();
        assert_eq!(third.status, 500);
        assert!(third.body.is_err());

        assert!(transport.post_recommendations(&request).await.is_err());
        assert_eq!(transport.call_count(), 4);
    }
}
