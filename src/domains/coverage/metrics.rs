use super::types::{WallConfig, Waypoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryMetrics {
    pub path_length: f64,
    pub coverage_percent: f64,
}

impl TrajectoryMetrics {
    pub fn compute(waypoints: &[Waypoint], config: &WallConfig) -> Self {
        let path_length = path_length(waypoints);
        Self {
            path_length,
            coverage_percent: coverage_percent(path_length, config),
        }
    }
}

/// Horizontal distance travelled within stripes.
///
/// Only consecutive waypoints sharing the same `y` count, and travel moves
/// count the same as painted runs.
pub fn path_length(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .filter(|pair| pair[1].y == pair[0].y)
        .map(|pair| (pair[1].x - pair[0].x).abs())
        .sum()
}

/// Swept area over wall area as a percentage, rounded to two decimals. Not clamped.
pub fn coverage_percent(path_length: f64, config: &WallConfig) -> f64 {
    let ratio = path_length * config.coverage_width / (config.width * config.height);
    round_to(ratio * 100.0, 2)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
