//! Outbound text fetching shared by the feed reader, the article link
//! extractor, and the Open Graph enricher.
//!
//! All network access in the winners pipeline goes through [`TextFetcher`] so
//! tests can run the whole pipeline against canned fixtures.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

/// Timed, abortable HTTP GET returning raw text.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Production fetcher backed by a shared `reqwest::Client`.
pub struct HttpTextFetcher {
    http: reqwest::Client,
}

impl HttpTextFetcher {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (hackathon-radar aggregator)")
            .connect_timeout(Duration::from_secs(4))
            .build()
            .context("building reqwest client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl TextFetcher for HttpTextFetcher {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String> {
        let resp = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("GET {url}: HTTP {status}"));
        }
        resp.text().await.with_context(|| format!("{url}: reading body"))
    }
}
