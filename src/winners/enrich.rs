// src/winners/enrich.rs
//! Best-effort Open Graph metadata extraction for accepted project links,
//! plus the title fallback used when an anchor carries no usable text.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Ordered image selectors; the first present value wins.
const OG_IMAGE_SELECTORS: &[&str] = &[
    r#"meta[property="og:image"]"#,
    r#"meta[name="og:image"]"#,
    r#"meta[name="twitter:image"]"#,
    r#"meta[property="twitter:image"]"#,
];

static IMAGE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    OG_IMAGE_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("valid og image selector"))
        .collect()
});
static OG_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("valid og title selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Absolute image URL, resolved against the project URL.
    pub image: Option<String>,
    /// Open Graph title, falling back to the document title.
    pub title: Option<String>,
}

/// Scan project-page HTML for an image and a title. Tolerates missing or
/// garbled tags; absent values simply stay `None`.
pub fn scan_page_meta(html: &str, base: &Url) -> PageMeta {
    let document = Html::parse_document(html);

    let mut image = None;
    for sel in IMAGE_SELECTORS.iter() {
        let content = document
            .select(sel)
            .next()
            .and_then(|el| el.value().attr("content"));
        if let Some(content) = content {
            if let Ok(abs) = base.join(content) {
                image = Some(abs.to_string());
                break;
            }
        }
    }

    let og_title = document
        .select(&OG_TITLE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let title = og_title.or_else(|| {
        document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    });

    PageMeta { image, title }
}

/// Build a human-readable title from the last URL path segment
/// ("my-cool_project" -> "My Cool Project"); falls back to the host.
pub fn prettify_title_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|p| !p.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_default();
    let segment = if segment.is_empty() {
        url.host_str().unwrap_or(url.as_str()).to_string()
    } else {
        segment
    };

    let decoded = urlencoding::decode(&segment)
        .map(|c| c.into_owned())
        .unwrap_or(segment);

    static RE_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]+").unwrap());
    let spaced = RE_SEP.replace_all(&decoded, " ");
    spaced
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
