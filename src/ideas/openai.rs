// src/ideas/openai.rs
//! OpenAI-backed idea provider (Chat Completions API). Model output is free
//! text; the first JSON block is extracted best-effort and anything that
//! fails to parse simply yields `None` so the caller falls back to rules.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ideas::{IdeaItem, IdeaProvider};

pub struct OpenAiIdeas {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiIdeas {
    /// `model_override`: pass Some("gpt-4o-mini") to override; defaults to gpt-4o-mini.
    pub fn new(api_key: String, model_override: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("hackathon-radar/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key,
            model: model_override.unwrap_or("gpt-4o-mini").to_string(),
        }
    }

    async fn fetch_ideas(&self, query: &str) -> Option<Vec<IdeaItem>> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let prompt = format!(
            "You are an expert hackathon mentor. Propose 3 winning project ideas \
             tailored to: \"{query}\". For each idea, return JSON with keys: title, \
             description, tools (array), stack (array), samplePrompts (array). \
             Keep it actionable and weekend-scoped."
        );
        let req = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.5,
        };

        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .ok()?;
        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "openai ideas request failed");
            return None;
        }
        let body: Resp = resp.json().await.ok()?;
        let content = body.choices.first().map(|c| c.message.content.as_str())?;
        parse_ideas_from_text(content)
    }
}

#[async_trait]
impl IdeaProvider for OpenAiIdeas {
    async fn generate(&self, query: &str) -> Option<Vec<IdeaItem>> {
        if self.api_key.is_empty() {
            return None;
        }
        self.fetch_ideas(query).await
    }
    fn name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Deserialize)]
struct IdeasEnvelope {
    ideas: Vec<IdeaItem>,
}

/// Best-effort extraction: take the first `{...}` or `[...]` block (the model
/// often wraps JSON in prose or code fences), accept either a bare array or
/// an `{ "ideas": [...] }` envelope.
pub fn parse_ideas_from_text(text: &str) -> Option<Vec<IdeaItem>> {
    static RE_JSON: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?s)\{.*\}|\[.*\]").unwrap());
    let candidate = RE_JSON
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or(text);

    if let Ok(list) = serde_json::from_str::<Vec<IdeaItem>>(candidate) {
        if !list.is_empty() {
            return Some(list);
        }
    }
    if let Ok(env) = serde_json::from_str::<IdeasEnvelope>(candidate) {
        if !env.ideas.is_empty() {
            return Some(env.ideas);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array_with_surrounding_prose() {
        let text = r#"Here are your ideas:
[{"title":"A","description":"d","tools":[],"stack":[],"samplePrompts":[]}]
Good luck!"#;
        let ideas = parse_ideas_from_text(text).unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].title, "A");
    }

    #[test]
    fn parses_ideas_envelope() {
        let text = r#"{"ideas":[{"title":"B","description":"d"}]}"#;
        let ideas = parse_ideas_from_text(text).unwrap();
        assert_eq!(ideas[0].title, "B");
        assert!(ideas[0].tools.is_empty());
    }

    #[test]
    fn unparseable_content_yields_none() {
        assert!(parse_ideas_from_text("no json here").is_none());
        assert!(parse_ideas_from_text("{\"broken\": ").is_none());
        assert!(parse_ideas_from_text("[]").is_none());
    }
}
