// src/winners/mod.rs
//! Winners aggregation pipeline and its TTL cache.
//!
//! Control flow per pass: feed reader -> classifier -> per-article link
//! extraction -> per-link Open Graph enrichment -> dedup + cap. Every inner
//! stage swallows its own failures (logged + counted), so a pass degrades to
//! fewer or less-decorated projects instead of failing the request.

pub mod classify;
pub mod config;
pub mod enrich;
pub mod extract;
pub mod feed;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

use crate::fetch::TextFetcher;
use crate::winners::config::WinnersConfig;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("winners_feed_items_total", "Feed items parsed from sources.");
        describe_counter!("winners_feed_errors_total", "Feed fetch/parse errors.");
        describe_counter!("winners_article_errors_total", "Article fetch/parse errors.");
        describe_counter!(
            "winners_enrich_errors_total",
            "Per-project Open Graph fetch failures."
        );
        describe_counter!("winners_projects_total", "Projects collected across passes.");
        describe_counter!("winners_refresh_total", "Completed pipeline refreshes.");
        describe_gauge!("winners_last_refresh_ts", "Unix ts of the last refresh.");
    });
}

/// The externally visible unit: one project linked from a winners article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WinnerProject {
    pub title: String,
    pub url: String,
    /// Hosting tag: devpost, challengepost, devfolio, hackster, github,
    /// gitlab, or medium.
    pub source: String,
    pub image: Option<String>,
    /// Inherited from the source article, raw as published.
    pub published_at: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WinnersResponse {
    pub projects: Vec<WinnerProject>,
    /// ISO-8601 capture timestamp.
    pub fetched_at: String,
    /// Always the full configured source-name list, regardless of which
    /// sources actually yielded items this pass.
    pub sources: Vec<String>,
}

/// One full aggregation pass. Never fails: a pass with every source down
/// still produces an (empty) response.
pub struct WinnersPipeline {
    fetcher: Arc<dyn TextFetcher>,
    config: WinnersConfig,
}

impl WinnersPipeline {
    pub fn new(config: WinnersConfig, fetcher: Arc<dyn TextFetcher>) -> Self {
        ensure_metrics_described();
        Self { fetcher, config }
    }

    pub fn config(&self) -> &WinnersConfig {
        &self.config
    }

    pub async fn run(&self) -> WinnersResponse {
        let fetch_timeout = Duration::from_secs(self.config.fetch_timeout_secs);
        let enrich_timeout = Duration::from_secs(self.config.enrich_timeout_secs);

        let items = feed::fetch_all(&*self.fetcher, &self.config.sources, fetch_timeout).await;
        let candidates: Vec<_> = items
            .into_iter()
            .filter(classify::is_likely_winners_article)
            .take(self.config.max_articles)
            .collect();

        let mut projects: Vec<WinnerProject> = Vec::new();
        // Dedup is per pass only; URLs seen in an earlier pass are fair game.
        let mut seen: HashSet<String> = HashSet::new();

        'articles: for article in &candidates {
            let html = match self.fetcher.fetch_text(&article.link, fetch_timeout).await {
                Ok(h) => h,
                Err(e) => {
                    tracing::warn!(error = ?e, article = %article.link, "article fetch error");
                    counter!("winners_article_errors_total").increment(1);
                    continue;
                }
            };
            let Ok(base) = Url::parse(&article.link) else {
                counter!("winners_article_errors_total").increment(1);
                continue;
            };

            for link in extract::extract_project_links(&html, &base) {
                let href = link.href.to_string();
                if !seen.insert(href.clone()) {
                    continue;
                }

                let mut project = WinnerProject {
                    title: if link.anchor_text.is_empty() {
                        enrich::prettify_title_from_url(&link.href)
                    } else {
                        link.anchor_text.clone()
                    },
                    url: href,
                    source: link.source.to_string(),
                    image: None,
                    published_at: article.published_at.clone(),
                    description: None,
                    tags: Vec::new(),
                };

                // Sequential by design; enrichment dominates pass latency.
                match self.fetcher.fetch_text(link.href.as_str(), enrich_timeout).await {
                    Ok(page) => {
                        let meta = enrich::scan_page_meta(&page, &link.href);
                        project.image = meta.image;
                        if link.anchor_text.trim().chars().count() < 3 {
                            if let Some(title) = meta.title {
                                project.title = title;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = ?e, project = %project.url, "enrich fetch error");
                        counter!("winners_enrich_errors_total").increment(1);
                    }
                }

                projects.push(project);
                if projects.len() >= self.config.max_projects {
                    break 'articles;
                }
            }
        }

        let now = Utc::now();
        counter!("winners_projects_total").increment(projects.len() as u64);
        counter!("winners_refresh_total").increment(1);
        gauge!("winners_last_refresh_ts").set(now.timestamp() as f64);
        tracing::info!(
            projects = projects.len(),
            articles = candidates.len(),
            "winners pipeline pass complete"
        );

        WinnersResponse {
            projects,
            fetched_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            sources: self.config.source_names(),
        }
    }
}

struct CacheEntry {
    captured_at: Instant,
    payload: WinnersResponse,
}

/// Single-slot TTL cache. The async mutex is held across a refresh, so
/// concurrent misses coalesce into one upstream run instead of racing.
pub struct WinnersCache {
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl WinnersCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// The only entry point: serve the slot if fresh, otherwise run the
    /// pipeline and replace the slot wholesale.
    pub async fn get_or_refresh(&self, pipeline: &WinnersPipeline) -> WinnersResponse {
        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref() {
            if entry.captured_at.elapsed() < self.ttl {
                return entry.payload.clone();
            }
        }
        let fresh = pipeline.run().await;
        *slot = Some(CacheEntry {
            captured_at: Instant::now(),
            payload: fresh.clone(),
        });
        fresh
    }
}

/// Pipeline + cache pair held in the app state.
pub struct WinnersService {
    pipeline: WinnersPipeline,
    cache: WinnersCache,
}

impl WinnersService {
    pub fn new(config: WinnersConfig, fetcher: Arc<dyn TextFetcher>) -> Self {
        let ttl = Duration::from_secs(config.ttl_secs);
        Self {
            pipeline: WinnersPipeline::new(config, fetcher),
            cache: WinnersCache::new(ttl),
        }
    }

    pub async fn get_or_refresh(&self) -> Result<WinnersResponse> {
        Ok(self.cache.get_or_refresh(&self.pipeline).await)
    }
}
