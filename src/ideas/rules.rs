// src/ideas/rules.rs
//! Deterministic keyword-rule idea generator. Each category regex that
//! matches the query contributes one fixed idea; a query matching nothing
//! gets the catch-all. Output order follows the category table.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ideas::IdeaItem;

fn base_stack() -> Vec<String> {
    [
        "React 18 + Vite",
        "Express API",
        "TailwindCSS",
        "Postgres (Neon) + Prisma",
        "Auth (Supabase)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

struct Category {
    pattern: &'static Lazy<Regex>,
    build: fn() -> IdeaItem,
}

macro_rules! category_re {
    ($name:ident, $re:expr) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($re).unwrap());
    };
}

category_re!(RE_AI, "ai|ml|gpt|llm|openai|rag|vision");
category_re!(RE_HEALTH, "health|med|wellness|fitness|mental");
category_re!(RE_FINTECH, "fintech|finance|bank|payment|crypto|web3|defi");
category_re!(RE_EDTECH, "education|edtech|learn|student|campus");
category_re!(RE_CLIMATE, "climate|sustainab|energy|green|carbon");
category_re!(RE_A11Y, "accessibility|a11y|inclusive|disab");

fn idea(
    title: &str,
    description: &str,
    tools: &[&str],
    sample_prompts: &[&str],
) -> IdeaItem {
    IdeaItem {
        title: title.to_string(),
        description: description.to_string(),
        tools: tools.iter().map(|s| s.to_string()).collect(),
        stack: base_stack(),
        sample_prompts: sample_prompts.iter().map(|s| s.to_string()).collect(),
    }
}

static CATEGORIES: &[Category] = &[
    Category {
        pattern: &RE_AI,
        build: || {
            idea(
                "AI Mentor for Hackathons",
                "An AI mentor that critiques ideas, suggests datasets/APIs, and outputs a weekend delivery plan.",
                &["OpenAI (or local Ollama)", "LangChain", "Pinecone or Supabase Vector", "OpenRouter"],
                &[
                    "Draft a weekend plan to build a fintech budgeting app for students.",
                    "Suggest APIs and datasets for a sustainability hackathon project.",
                ],
            )
        },
    },
    Category {
        pattern: &RE_HEALTH,
        build: || {
            idea(
                "Health Habit Tracker with Wearables",
                "Aggregates wearable data and suggests micro-habits. Includes symptom checker and provider handoff.",
                &["Apple/Google Health Connect", "Zod for validations", "Sentry"],
                &["Generate 5 features for a diabetes care hackathon in 36 hours."],
            )
        },
    },
    Category {
        pattern: &RE_FINTECH,
        build: || {
            idea(
                "Micro-Savings with Round-Ups",
                "Rounds up purchases into smart vaults, with explainable AI insights.",
                &["Plaid", "Stripe", "ethers.js / thirdweb (if web3)", "Zustand"],
                &["Design a round-up savings MVP for Gen Z with 3 killer features."],
            )
        },
    },
    Category {
        pattern: &RE_EDTECH,
        build: || {
            idea(
                "Campus Resource Copilot",
                "Searches all campus resources (docs, PDFs, events) with RAG and personalized roadmaps.",
                &["Supabase", "pgvector", "OpenAI"],
                &["Outline onboarding for freshmen and key RAG sources."],
            )
        },
    },
    Category {
        pattern: &RE_CLIMATE,
        build: || {
            idea(
                "Neighborhood Climate Scorecard",
                "Scrapes municipal data and crowdsources actions with gamified points.",
                &["Cheerio/Playwright", "Mapbox", "tRPC or REST"],
                &["What public datasets help rank city blocks by climate resilience?"],
            )
        },
    },
    Category {
        pattern: &RE_A11Y,
        build: || {
            idea(
                "Accessible Web Scanner",
                "Real-time accessibility checker with actionable fixes and Figma plugin integration.",
                &["axe-core", "Puppeteer", "Figma Plugin"],
                &["Plan an MVP that audits a website and auto-fixes common a11y issues."],
            )
        },
    },
];

/// Generate ideas for a query. Always returns at least one idea.
pub fn generate(query: &str) -> Vec<IdeaItem> {
    let q = query.to_lowercase();
    let mut ideas: Vec<IdeaItem> = CATEGORIES
        .iter()
        .filter(|c| c.pattern.is_match(&q))
        .map(|c| (c.build)())
        .collect();

    if ideas.is_empty() {
        ideas.push(idea(
            "Smart Project Assistant",
            "Suggests project angles, tools, and weekend roadmap tailored to your theme.",
            &["OpenAI (optional)", "Supabase", "Prisma", "Vercel/Netlify"],
            &["I want to build something for social impact using maps and SMS."],
        ));
    }
    ideas
}
