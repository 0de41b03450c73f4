//! HTTP client for the research backend.
//!
//! Every call validates its input, tags the request with an `X-Request-Id`,
//! and runs under a `tokio` timeout. Report generation gets the long
//! research timeout; everything else the shorter request timeout.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;
use validator::Validate;

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::models::{
    FollowUpRequest, FollowUpResponse, ImageRequest, ImageResponse, PromptRefinement,
    RefinePromptRequest, ResearchRequest, ResearchResponse,
};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Operations the research backend offers.
///
/// Abstracts the transport so the pipeline can run against a stub in tests.
#[async_trait]
pub trait ResearchBackend: Send + Sync + 'static {
    /// Generates a full report for a topic.
    async fn research(
        &self,
        topic: &str,
        fast_mode: Option<bool>,
    ) -> Result<ResearchResponse, AppError>;

    /// Answers a question using a previous report as context.
    async fn follow_up(
        &self,
        question: &str,
        topic: &str,
        report: &str,
    ) -> Result<String, AppError>;

    async fn generate_image(&self, prompt: &str, refine: bool) -> Result<ImageResponse, AppError>;

    async fn refine_prompt(&self, prompt: &str) -> Result<PromptRefinement, AppError>;
}

/// `reqwest`-backed implementation of [`ResearchBackend`].
#[derive(Debug, Clone)]
pub struct HttpResearchClient {
    client: Client,
    base_url: Url,
    research_timeout: Duration,
    request_timeout: Duration,
    fast_mode: bool,
}

impl HttpResearchClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        config.validate()?;
        // Trailing slash so joins keep any path prefix
        let base_url = Url::parse(&format!("{}/", config.api_url.trim_end_matches('/')))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            research_timeout: config.research_timeout(),
            request_timeout: config.request_timeout(),
            fast_mode: config.fast_mode,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B, limit: Duration) -> Result<R, AppError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.base_url.join(endpoint)?;
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        info!("POST {} (request {})", url, request_id);

        let send = self
            .client
            .post(url.clone())
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body)
            .send();

        let res = timeout(limit, send).await??;
        let status = res.status();

        if !status.is_success() {
            let body = timeout(limit, res.text())
                .await?
                .unwrap_or_default();
            let message = error_detail(&body);
            warn!(
                "POST {} failed with status {} after {}ms: {}",
                url,
                status,
                started.elapsed().as_millis(),
                message
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = timeout(limit, res.text()).await??;
        let parsed = serde_json::from_str(&text)?;
        info!(
            "POST {} succeeded in {}ms (request {})",
            url,
            started.elapsed().as_millis(),
            request_id
        );
        Ok(parsed)
    }
}

/// The backend reports failures as `{"detail": "..."}`; fall back to the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ResearchBackend for HttpResearchClient {
    async fn research(
        &self,
        topic: &str,
        fast_mode: Option<bool>,
    ) -> Result<ResearchResponse, AppError> {
        let request = ResearchRequest {
            topic: topic.trim().to_string(),
            fast_mode: Some(fast_mode.unwrap_or(self.fast_mode)).filter(|fast| *fast),
        };
        request.validate()?;
        self.post("api/research", &request, self.research_timeout).await
    }

    async fn follow_up(
        &self,
        question: &str,
        topic: &str,
        report: &str,
    ) -> Result<String, AppError> {
        let request = FollowUpRequest {
            question: question.trim().to_string(),
            original_topic: topic.trim().to_string(),
            original_report: report.to_string(),
        };
        request.validate()?;
        let response: FollowUpResponse = self
            .post("api/follow-up", &request, self.request_timeout)
            .await?;
        Ok(response.answer)
    }

    async fn generate_image(&self, prompt: &str, refine: bool) -> Result<ImageResponse, AppError> {
        let request = ImageRequest {
            prompt: prompt.trim().to_string(),
            refine_prompt: Some(refine),
        };
        request.validate()?;
        let response: ImageResponse = self
            .post("api/generate-image", &request, self.request_timeout)
            .await?;
        if response.fallback {
            warn!(
                "Backend returned a fallback image: {}",
                response.error.as_deref().unwrap_or("no reason given")
            );
        }
        Ok(response)
    }

    async fn refine_prompt(&self, prompt: &str) -> Result<PromptRefinement, AppError> {
        let request = RefinePromptRequest {
            prompt: prompt.trim().to_string(),
        };
        request.validate()?;
        self.post("api/refine-prompt", &request, self.request_timeout).await
    }
}
