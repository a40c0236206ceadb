// src/winners/feed.rs
//! RSS feed reader: fetches each configured source, parses `rss/channel/item`
//! records, and merges everything into one newest-first sequence.
//!
//! A source that fails to fetch or parse contributes zero items; the pass as
//! a whole never fails because of one bad feed.

use anyhow::{Context, Result};
use metrics::counter;
use chrono::DateTime;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::fetch::TextFetcher;
use crate::winners::config::FeedSource;

/// One normalized feed entry. `published_ts` is unix seconds derived from
/// `published_at` (0 when missing or unparseable, which sorts oldest).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub source: String,
    pub title: String,
    pub link: String,
    pub published_at: Option<String>,
    pub published_ts: u64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

fn parse_rfc2822_to_unix(ts: &str) -> u64 {
    DateTime::parse_from_rfc2822(ts)
        .ok()
        .map(|dt| dt.timestamp())
        .and_then(|x| u64::try_from(x).ok())
        .unwrap_or(0)
}

/// Strip markup and decode entities so the classifier sees plain text.
pub fn normalize_description(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

/// Parse one feed body into items. Entries without a title or link are
/// dropped; everything else is kept as-is for downstream stages.
pub fn parse_feed(source_name: &str, xml: &str) -> Result<Vec<FeedItem>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let rss: Rss = from_str(&xml_clean).with_context(|| format!("parsing {source_name} rss xml"))?;

    let mut out = Vec::with_capacity(rss.channel.item.len());
    for it in rss.channel.item {
        let title = it.title.as_deref().unwrap_or_default().trim().to_string();
        let link = it.link.as_deref().unwrap_or_default().trim().to_string();
        if title.is_empty() || link.is_empty() {
            continue;
        }
        out.push(FeedItem {
            source: source_name.to_string(),
            title,
            link,
            published_ts: it.pub_date.as_deref().map(parse_rfc2822_to_unix).unwrap_or(0),
            published_at: it.pub_date,
            description: it.description.as_deref().map(normalize_description),
        });
    }
    counter!("winners_feed_items_total").increment(out.len() as u64);
    Ok(out)
}

/// Fetch and parse every source, merge, and sort newest first. Per-source
/// failures are logged and counted, never propagated.
pub async fn fetch_all(
    fetcher: &dyn TextFetcher,
    sources: &[FeedSource],
    timeout: std::time::Duration,
) -> Vec<FeedItem> {
    let mut items = Vec::new();
    for src in sources {
        let body = match fetcher.fetch_text(&src.url, timeout).await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = ?e, source = %src.name, "feed fetch error");
                counter!("winners_feed_errors_total").increment(1);
                continue;
            }
        };
        match parse_feed(&src.name, &body) {
            Ok(mut v) => items.append(&mut v),
            Err(e) => {
                tracing::warn!(error = ?e, source = %src.name, "feed parse error");
                counter!("winners_feed_errors_total").increment(1);
            }
        }
    }
    // Stable sort keeps document order for equal timestamps.
    items.sort_by(|a, b| b.published_ts.cmp(&a.published_ts));
    items
}

fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
