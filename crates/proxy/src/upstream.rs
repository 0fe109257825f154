use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use landing_core::AnalyticsSettings;
use reqwest::Url;

/// Upstream reply with the body fully read into memory
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Source of the analytics script.
///
/// One call is one fetch attempt; implementations must not retry.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch the script sending exactly `headers`
    async fn fetch(&self, headers: HeaderMap) -> Result<UpstreamResponse>;
}

/// Fetches the script over HTTP with reqwest
pub struct HttpUpstream {
    client: reqwest::Client,
    url: Url,
}

impl HttpUpstream {
    /// Build the upstream from the analytics settings (`<upstream_url>?id=<measurement id>`)
    pub fn new(settings: &AnalyticsSettings) -> Result<Self> {
        let url = script_url(&settings.upstream_url, settings.measurement_id.as_deref())?;
        Self::with_url(url)
    }

    pub fn with_url(url: Url) -> Result<Self> {
        // No timeout and no retries: a single attempt bounded by the platform defaults
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, headers: HeaderMap) -> Result<UpstreamResponse> {
        let response = self
            .client
            .get(self.url.clone())
            .headers(headers)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body from {}", self.url))?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}

/// Script URL for a measurement id
pub fn script_url(base: &str, measurement_id: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid upstream URL: {}", base))?;
    if let Some(id) = measurement_id {
        url.query_pairs_mut().append_pair("id", id);
    }
    Ok(url)
}
