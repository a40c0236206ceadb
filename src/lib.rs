// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod fetch;
pub mod ideas;
pub mod metrics;
pub mod winners;

use std::sync::Arc;

use axum::Router;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::winners::{WinnersResponse, WinnersService};

/// Build the production app router: default config resolution, real HTTP
/// fetcher, idea provider picked from the environment. The /metrics exporter
/// is mounted by the binary, not here, so tests can call this repeatedly.
pub async fn app() -> anyhow::Result<Router> {
    let config = winners::config::load_default()?;
    let fetcher: Arc<dyn fetch::TextFetcher> = Arc::new(fetch::HttpTextFetcher::new()?);
    let state = AppState {
        winners: Arc::new(WinnersService::new(config, fetcher)),
        ideas: ideas::build_idea_provider(),
    };
    Ok(router(state))
}
