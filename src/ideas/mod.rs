// src/ideas/mod.rs
//! Idea generation: an external model provider with a deterministic
//! rule-based fallback. The provider abstraction mirrors the fetch layer:
//! a trait object in app state, swapped for stubs in tests.

pub mod openai;
pub mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdeaItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub sample_prompts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeasResponse {
    pub ideas: Vec<IdeaItem>,
    /// "openai" when the external provider answered, "rules" otherwise.
    pub provider: String,
}

/// External idea provider. `None` means "no answer, fall back to rules" —
/// an unreachable model is a degraded path, never an error to the caller.
#[async_trait]
pub trait IdeaProvider: Send + Sync {
    async fn generate(&self, query: &str) -> Option<Vec<IdeaItem>>;
    fn name(&self) -> &'static str;
}

pub type DynIdeaProvider = Arc<dyn IdeaProvider>;

/// Used when no API key is configured.
pub struct DisabledProvider;

#[async_trait]
impl IdeaProvider for DisabledProvider {
    async fn generate(&self, _query: &str) -> Option<Vec<IdeaItem>> {
        None
    }
    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Factory: the OpenAI provider when `OPENAI_API_KEY` is set, disabled
/// otherwise.
pub fn build_idea_provider() -> DynIdeaProvider {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Arc::new(openai::OpenAiIdeas::new(key, None)),
        _ => Arc::new(DisabledProvider),
    }
}
