//! Plans a wall offline and prints the trajectory as JSON.
//!
//! Usage: `coverage_plan <wall.json | ->`. The input has the same shape as a
//! `POST /api/trajectories` body.

use std::io::Read;

use anyhow::{bail, Context};
use serde_json::json;

use wall_coverage::adapters::inbound::TrajectoryRequest;
use wall_coverage::config::PlannerConfig;
use wall_coverage::domains::coverage::{generate_trajectory, TrajectoryId, TrajectoryMetrics};

fn main() -> anyhow::Result<()> {
    let Some(source) = std::env::args().nth(1) else {
        bail!("usage: coverage_plan <wall.json | ->");
    };

    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(&source).with_context(|| format!("reading {}", source))?
    };

    let request: TrajectoryRequest = serde_json::from_str(&raw).context("parsing wall configuration")?;
    let config = request.into_config(PlannerConfig::default().default_coverage_width);
    let waypoints = generate_trajectory(&config)?;
    let metrics = TrajectoryMetrics::compute(&waypoints, &config);

    let output = json!({
        "id": TrajectoryId::from_config(&config),
        "stripes": config.stripe_count(),
        "metrics": metrics,
        "waypoints": waypoints,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
