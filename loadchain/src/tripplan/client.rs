//! HTTP client for the hosted text-generation service.
//!
//! Trip plans are additive: a failed or unconfigured generation never
//! affects the chain search result, so failures here are logged and the
//! affected chain simply ships without a plan.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::RouteChain;
use crate::search::SearchCriteria;

use super::error::PlanError;
use super::plan::TripPlan;
use super::prompt::build_prompt;

/// Default base URL for the generation API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
const DEFAULT_MODEL: &str = "gemini-pro";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Plans are only generated for this many top-ranked chains per request.
const TOP_CHAIN_COUNT: usize = 5;

/// Configuration for the trip-plan client.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// API key for the generation service.
    pub api_key: String,

    /// Base URL for the API (defaults to the hosted service).
    pub base_url: String,

    /// Model name to generate with.
    pub model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl PlanConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the generation model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ReplyCandidate>,
}

#[derive(Deserialize)]
struct ReplyCandidate {
    content: ReplyContent,
}

#[derive(Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

/// Client for the text-generation API.
#[derive(Debug, Clone)]
pub struct PlanClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl PlanClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PlanConfig) -> Result<Self, PlanError> {
        if config.api_key.is_empty() {
            return Err(PlanError::NotConfigured("missing API key".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            model: config.model,
            api_key: config.api_key,
        })
    }

    /// Generate free text for one prompt.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, PlanError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlanError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let reply: GenerateResponse = response.json().await?;
        let text: String = reply
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(PlanError::EmptyReply);
        }
        Ok(text)
    }

    /// Generate plans for the top-ranked chains, concurrently.
    ///
    /// Only the first [`TOP_CHAIN_COUNT`] chains are planned, to keep the
    /// fan-out bounded. Chains whose generation fails are skipped with a
    /// warning; the returned plans keep rank order.
    pub async fn plans_for_chains(
        &self,
        ranked_chains: &[RouteChain],
        criteria: &SearchCriteria,
    ) -> Vec<TripPlan> {
        let requests = ranked_chains
            .iter()
            .take(TOP_CHAIN_COUNT)
            .enumerate()
            .map(|(i, chain)| async move {
                let rank = i + 1;
                let prompt = build_prompt(chain, rank, criteria);
                (rank, self.generate_text(&prompt).await)
            });

        let mut plans = Vec::new();
        for (rank, result) in join_all(requests).await {
            match result {
                Ok(text) => plans.push(TripPlan::from_text(rank, &text)),
                Err(e) => {
                    warn!(rank, error = %e, "trip plan generation failed, skipping chain");
                }
            }
        }
        plans
    }
}
