//! Hackathon Radar — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and the
//! Prometheus exporter.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hackathon_radar::api::{self, AppState};
use hackathon_radar::fetch::{HttpTextFetcher, TextFetcher};
use hackathon_radar::ideas;
use hackathon_radar::metrics::Metrics;
use hackathon_radar::winners::{config, WinnersService};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hackathon_radar=info,warn"));
    // try_init: tolerate an already-installed subscriber in local tooling.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = config::load_default().map_err(shuttle_runtime::Error::Custom)?;
    let metrics = Metrics::init(cfg.ttl_secs).map_err(shuttle_runtime::Error::Custom)?;

    let fetcher: Arc<dyn TextFetcher> =
        Arc::new(HttpTextFetcher::new().map_err(shuttle_runtime::Error::Custom)?);
    let state = AppState {
        winners: Arc::new(WinnersService::new(cfg, fetcher)),
        ideas: ideas::build_idea_provider(),
    };

    let router = api::router(state).merge(metrics.router());
    Ok(router.into())
}
