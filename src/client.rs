//! Detection service client
//!
//! Thin wrapper over the remote API. The `try_*` methods surface every
//! failure; `detect_email` and `detect_url` fall back to a cautious
//! verdict so an interactive caller always has something to show.

use crate::analytics::{DashboardAnalytics, RecentDetection};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{DetectionResult, HealthStatus, ParsedEmail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// Confidence reported with the fallback verdict for emails
pub const EMAIL_FALLBACK_CONFIDENCE: u8 = 50;

/// Confidence reported with the fallback verdict for URLs
pub const URL_FALLBACK_CONFIDENCE: u8 = 45;

#[derive(Serialize)]
struct UrlRequest<'a> {
    url: &'a str,
}

/// HTTP client for the detection API
#[derive(Debug, Clone)]
pub struct DetectionClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl DetectionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("phishguard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Client configured from `PHISHGUARD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit an email for detection
    pub async fn try_detect_email(&self, email: &ParsedEmail) -> Result<DetectionResult> {
        info!(from = %email.from, subject = %email.subject, "Submitting email for detection");
        self.post_json("detect/email", email).await
    }

    /// Submit an email, falling back to a `SUSPICIOUS` verdict on failure
    pub async fn detect_email(&self, email: &ParsedEmail) -> DetectionResult {
        match self.try_detect_email(email).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to analyze email");
                DetectionResult::connection_error(EMAIL_FALLBACK_CONFIDENCE)
            }
        }
    }

    /// Submit a URL for detection
    pub async fn try_detect_url(&self, url: &str) -> Result<DetectionResult> {
        info!(url, "Submitting URL for detection");
        self.post_json("detect/url", &UrlRequest { url }).await
    }

    /// Submit a URL, falling back to a `SUSPICIOUS` verdict on failure
    pub async fn detect_url(&self, url: &str) -> DetectionResult {
        match self.try_detect_url(url).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to analyze URL");
                DetectionResult::connection_error(URL_FALLBACK_CONFIDENCE)
            }
        }
    }

    /// Fetch dashboard counters
    pub async fn dashboard_analytics(&self) -> Result<DashboardAnalytics> {
        self.get_json("analytics/dashboard").await
    }

    /// Fetch the most recent detections, newest first
    pub async fn recent_activity(&self, limit: u32) -> Result<Vec<RecentDetection>> {
        self.get_json(&format!("analytics/recent?limit={limit}")).await
    }

    /// Check whether the service is up
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json("health").await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.config.endpoint(path))
            .json(body)
            .send()
            .await?;
        decode_response(response).await
    }

    async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(self.config.endpoint(path)).send().await?;
        decode_response(response).await
    }
}

async fn decode_response<T>(response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
