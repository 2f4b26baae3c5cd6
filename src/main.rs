use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wall_coverage::adapters::inbound::{router, serve, AppState};
use wall_coverage::adapters::outbound::{connect_store, flush_logs, init_combined_logger};
use wall_coverage::application::TrajectoryService;
use wall_coverage::domains::coverage::{CoveragePlanner, PlannerSettings};
use wall_coverage::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&config_path)?;

    // Installed as the `tracing` default only, so fast_log can own the `log` facade.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;

    info!("Starting wall coverage planner");
    info!("Storage backend: {:?}", config.storage.backend);

    let logger = init_combined_logger(config.logging.file.as_deref());
    let store = connect_store(&config.storage, &config.postgres)
        .await
        .context("connecting trajectory store")?;
    let planner = CoveragePlanner::new(PlannerSettings {
        max_stripes: config.planner.max_stripes,
        max_waypoints: config.planner.max_waypoints,
    });
    let service = Arc::new(TrajectoryService::new(planner, store, logger));

    let state = AppState::new(service, config.planner.default_coverage_width);
    let app = router(state, config.server.allow_any_origin);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on {}", addr);

    serve(listener, app, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down wall coverage planner");
        }
    })
    .await?;

    flush_logs();
    Ok(())
}
