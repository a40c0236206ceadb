// tests/winners_pipeline.rs
//
// Full aggregation passes against canned fixtures: feed -> classifier ->
// link extraction -> enrichment -> dedup + cap, with no sockets involved.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use hackathon_radar::fetch::TextFetcher;
use hackathon_radar::winners::config::{FeedSource, WinnersConfig};
use hackathon_radar::winners::WinnersPipeline;

struct StubFetcher {
    pages: HashMap<String, String>,
}

#[async_trait]
impl TextFetcher for StubFetcher {
    async fn fetch_text(&self, url: &str, _timeout: Duration) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("GET {url}: timed out"))
    }
}

const FEED_A: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <item>
    <title>Hackathon Winners Announced</title>
    <link>https://blog.example.com/winners-2025</link>
    <pubDate>Tue, 05 Aug 2025 10:00:00 GMT</pubDate>
  </item>
  <item>
    <title>Upcoming Events</title>
    <link>https://blog.example.com/events</link>
    <pubDate>Wed, 06 Aug 2025 10:00:00 GMT</pubDate>
  </item>
</channel></rss>"#;

const FEED_B: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <item>
    <title>Spring batch results</title>
    <link>https://town.example.com/results</link>
    <pubDate>Mon, 04 Aug 2025 09:00:00 GMT</pubDate>
  </item>
</channel></rss>"#;

const ARTICLE_WINNERS: &str = r#"<html><body>
  <a href="https://github.com/acme/alpha">Alpha Project</a>
  <a href="https://devpost.com/software/beta">B</a>
  <a href="https://github.com/acme/alpha">Alpha again</a>
  <a href="https://example.com/not-a-project">Elsewhere</a>
</body></html>"#;

const ARTICLE_RESULTS: &str = r#"<html><body>
  <a href="https://github.com/acme/alpha">Alpha cross-post</a>
  <a href="https://gitlab.com/acme/gamma">Gamma</a>
</body></html>"#;

// Never reachable: its article is not a winners candidate.
const ARTICLE_EVENTS: &str = r#"<html><body>
  <a href="https://medium.com/acme/keynote">Keynote</a>
</body></html>"#;

const PAGE_ALPHA: &str = r#"<head>
  <meta property="og:image" content="https://cdn.example.com/alpha.png">
</head>"#;

const PAGE_BETA: &str = r#"<head>
  <meta property="og:title" content="Beta Vision Board">
  <meta name="twitter:image" content="/assets/beta.png">
</head>"#;

fn fixture_pages() -> HashMap<String, String> {
    let mut pages = HashMap::new();
    pages.insert("https://feeds.test/a".to_string(), FEED_A.to_string());
    pages.insert("https://feeds.test/b".to_string(), FEED_B.to_string());
    pages.insert(
        "https://blog.example.com/winners-2025".to_string(),
        ARTICLE_WINNERS.to_string(),
    );
    pages.insert(
        "https://town.example.com/results".to_string(),
        ARTICLE_RESULTS.to_string(),
    );
    pages.insert(
        "https://blog.example.com/events".to_string(),
        ARTICLE_EVENTS.to_string(),
    );
    pages.insert(
        "https://github.com/acme/alpha".to_string(),
        PAGE_ALPHA.to_string(),
    );
    pages.insert(
        "https://devpost.com/software/beta".to_string(),
        PAGE_BETA.to_string(),
    );
    // https://gitlab.com/acme/gamma intentionally absent: enrich fetch fails.
    pages
}

fn test_config() -> WinnersConfig {
    WinnersConfig {
        sources: vec![
            FeedSource {
                name: "Feed A".into(),
                url: "https://feeds.test/a".into(),
            },
            FeedSource {
                name: "Feed B".into(),
                url: "https://feeds.test/b".into(),
            },
        ],
        ..WinnersConfig::default()
    }
}

fn pipeline_with(config: WinnersConfig, pages: HashMap<String, String>) -> WinnersPipeline {
    WinnersPipeline::new(config, Arc::new(StubFetcher { pages }))
}

#[tokio::test]
async fn full_pass_dedups_orders_and_inherits_publish_dates() {
    let pipeline = pipeline_with(test_config(), fixture_pages());
    let resp = pipeline.run().await;

    let urls: Vec<_> = resp.projects.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://github.com/acme/alpha",
            "https://devpost.com/software/beta",
            "https://gitlab.com/acme/gamma",
        ],
        "newest article first, document order within, duplicates dropped"
    );

    let mut unique = urls.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), urls.len(), "project URLs must be unique");

    assert_eq!(resp.projects[0].source, "github");
    assert_eq!(resp.projects[1].source, "devpost");
    assert_eq!(resp.projects[2].source, "gitlab");

    assert_eq!(
        resp.projects[0].published_at.as_deref(),
        Some("Tue, 05 Aug 2025 10:00:00 GMT")
    );
    assert_eq!(
        resp.projects[2].published_at.as_deref(),
        Some("Mon, 04 Aug 2025 09:00:00 GMT")
    );
}

#[tokio::test]
async fn enrichment_applies_images_and_short_anchor_title_fallback() {
    let pipeline = pipeline_with(test_config(), fixture_pages());
    let resp = pipeline.run().await;

    let alpha = &resp.projects[0];
    assert_eq!(alpha.title, "Alpha Project");
    assert_eq!(alpha.image.as_deref(), Some("https://cdn.example.com/alpha.png"));

    // Anchor text "B" is under 3 chars, so the OG title wins; the relative
    // twitter:image resolves against the project URL.
    let beta = &resp.projects[1];
    assert_eq!(beta.title, "Beta Vision Board");
    assert_eq!(beta.image.as_deref(), Some("https://devpost.com/assets/beta.png"));
}

#[tokio::test]
async fn enrichment_failure_still_emits_the_project_with_null_image() {
    let pipeline = pipeline_with(test_config(), fixture_pages());
    let resp = pipeline.run().await;

    let gamma = &resp.projects[2];
    assert_eq!(gamma.title, "Gamma");
    assert_eq!(gamma.image, None);

    let json = serde_json::to_value(gamma).unwrap();
    assert!(json.get("image").unwrap().is_null(), "image must serialize as null");
}

#[tokio::test]
async fn non_candidate_articles_are_never_crawled() {
    let pipeline = pipeline_with(test_config(), fixture_pages());
    let resp = pipeline.run().await;
    assert!(
        resp.projects.iter().all(|p| p.source != "medium"),
        "links behind non-winner articles must not appear"
    );
}

#[tokio::test]
async fn project_cap_short_circuits_remaining_links_and_articles() {
    let config = WinnersConfig {
        max_projects: 2,
        ..test_config()
    };
    let pipeline = pipeline_with(config, fixture_pages());
    let resp = pipeline.run().await;

    assert_eq!(resp.projects.len(), 2);
    assert_eq!(resp.projects[0].url, "https://github.com/acme/alpha");
    assert_eq!(resp.projects[1].url, "https://devpost.com/software/beta");
}

#[tokio::test]
async fn failing_source_contributes_nothing_but_sources_list_stays_full() {
    let mut pages = fixture_pages();
    pages.remove("https://feeds.test/b");

    let pipeline = pipeline_with(test_config(), pages);
    let resp = pipeline.run().await;

    assert_eq!(resp.sources, vec!["Feed A", "Feed B"]);
    assert!(resp
        .projects
        .iter()
        .all(|p| p.url != "https://gitlab.com/acme/gamma"));
    assert!(!resp.projects.is_empty(), "healthy source still contributes");
}

#[tokio::test]
async fn all_sources_down_yields_an_empty_but_successful_pass() {
    let pipeline = pipeline_with(test_config(), HashMap::new());
    let resp = pipeline.run().await;
    assert!(resp.projects.is_empty());
    assert_eq!(resp.sources, vec!["Feed A", "Feed B"]);
    assert!(!resp.fetched_at.is_empty());
}
