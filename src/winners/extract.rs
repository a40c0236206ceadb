// src/winners/extract.rs
//! Anchor extraction and project-host classification.
//!
//! Every `a[href]` in an article page is resolved against the article URL,
//! then matched against an ordered table of known project-hosting domains.
//! Order is authoritative for ties; the patterns are designed not to overlap.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

/// A candidate project link found in an article, already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLink {
    pub href: Url,
    pub anchor_text: String,
    pub source: &'static str,
}

/// Ordered (tag, host) table; exact host or any subdomain matches, and the
/// URL must carry a non-empty path (a bare homepage is not a project).
const PROJECT_HOSTS: &[(&str, &str)] = &[
    ("devpost", "devpost.com"),
    ("challengepost", "challengepost.com"),
    ("devfolio", "devfolio.co"),
    ("hackster", "hackster.io"),
    ("github", "github.com"),
    ("gitlab", "gitlab.com"),
    ("medium", "medium.com"),
];

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Classify a resolved URL against the project-host table.
pub fn classify_project_url(url: &Url) -> Option<&'static str> {
    let host = url.host_str()?.to_ascii_lowercase();
    if url.path().trim_matches('/').is_empty() {
        return None;
    }
    PROJECT_HOSTS
        .iter()
        .find(|(_, domain)| host == *domain || host.ends_with(&format!(".{domain}")))
        .map(|(tag, _)| *tag)
}

/// Extract all project links from article HTML in document order.
/// Anchors with unparseable hrefs or non-matching hosts are discarded.
pub fn extract_project_links(html: &str, base: &Url) -> Vec<ProjectLink> {
    let document = Html::parse_document(html);
    let mut out = Vec::new();
    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        let Some(source) = classify_project_url(&resolved) else {
            continue;
        };
        let anchor_text = element.text().collect::<String>().trim().to_string();
        out.push(ProjectLink {
            href: resolved,
            anchor_text,
            source,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn github_project_url_classifies_as_github() {
        assert_eq!(
            classify_project_url(&url("https://github.com/acme/project")),
            Some("github")
        );
    }

    #[test]
    fn unknown_host_is_discarded() {
        assert_eq!(classify_project_url(&url("https://example.com/blog")), None);
    }

    #[test]
    fn subdomains_match_but_bare_homepages_do_not() {
        assert_eq!(
            classify_project_url(&url("https://www.devpost.com/software/thing")),
            Some("devpost")
        );
        assert_eq!(
            classify_project_url(&url("https://myhack.devfolio.co/projects/x")),
            Some("devfolio")
        );
        assert_eq!(classify_project_url(&url("https://github.com/")), None);
    }

    #[test]
    fn lookalike_hosts_do_not_match() {
        assert_eq!(
            classify_project_url(&url("https://notgithub.com/acme/project")),
            None
        );
    }

    #[test]
    fn extracts_in_document_order_and_resolves_relative_hrefs() {
        let html = r#"
            <html><body>
              <a href="https://devpost.com/software/alpha">Alpha</a>
              <a href="/local/page">Local</a>
              <a href="//github.com/acme/beta">Beta</a>
              <a href="https://example.com/elsewhere">Elsewhere</a>
            </body></html>"#;
        let base = url("https://blog.example.com/winners-2025");
        let links = extract_project_links(html, &base);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].source, "devpost");
        assert_eq!(links[0].anchor_text, "Alpha");
        assert_eq!(links[1].source, "github");
        assert_eq!(links[1].href.as_str(), "https://github.com/acme/beta");
    }

    #[test]
    fn garbled_markup_still_yields_what_it_can() {
        let html = r##"<a href="https://gitlab.com/acme/p">P</a><div><a href="#>"##;
        let links = extract_project_links(html, &url("https://example.com/a"));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source, "gitlab");
    }
}
