// src/winners/config.rs
//! Pipeline tuning knobs. The caps and TTL are tuning constants, not
//! invariants, so they are configurable; defaults match the values the
//! service has always shipped with.
//!
//! Resolution order:
//! 1) $WINNERS_CONFIG_PATH (must exist if set)
//! 2) config/winners.toml
//! 3) built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const ENV_CONFIG_PATH: &str = "WINNERS_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/winners.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WinnersConfig {
    pub sources: Vec<FeedSource>,
    /// Cache slot lifetime in seconds.
    pub ttl_secs: u64,
    /// Newest qualifying articles processed per pass.
    pub max_articles: usize,
    /// Hard cap on collected projects per pass.
    pub max_projects: usize,
    /// Feed and article fetch timeout.
    pub fetch_timeout_secs: u64,
    /// Per-project Open Graph fetch timeout.
    pub enrich_timeout_secs: u64,
}

impl Default for WinnersConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            ttl_secs: 600,
            max_articles: 10,
            max_projects: 50,
            fetch_timeout_secs: 15,
            enrich_timeout_secs: 8,
        }
    }
}

impl WinnersConfig {
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }
}

fn default_sources() -> Vec<FeedSource> {
    [
        ("MLH Blog", "https://mlh.io/blog/feed"),
        ("Dev.to #hackathon", "https://dev.to/feed/tag/hackathon"),
        ("Hashnode Townhall", "https://townhall.hashnode.com/rss"),
    ]
    .into_iter()
    .map(|(name, url)| FeedSource {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

pub fn load_from(path: &Path) -> Result<WinnersConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading winners config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_default() -> Result<WinnersConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        }
        return Err(anyhow!("WINNERS_CONFIG_PATH points to non-existent path"));
    }
    let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_p.exists() {
        return load_from(&default_p);
    }
    Ok(WinnersConfig::default())
}
