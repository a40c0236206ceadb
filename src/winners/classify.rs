// src/winners/classify.rs
//! Heuristic filter for "winner announcement" articles. Any vocabulary hit
//! in title + description qualifies; precision is traded for simplicity.

use crate::winners::feed::FeedItem;

const WINNER_HINTS: &[&str] = &[
    "winner",
    "winners",
    "top",
    "prize",
    "finalist",
    "finalists",
    "result",
    "results",
    "announc",
];

pub fn is_likely_winners_article(item: &FeedItem) -> bool {
    let haystack = format!(
        "{} {}",
        item.title,
        item.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    WINNER_HINTS.iter().any(|h| haystack.contains(h))
}
