//! Boustrophedon coverage planner.
//!
//! The wall is swept by horizontal stripes spaced one coverage width apart,
//! starting half a width above the bottom edge. Every stripe is clipped
//! against the obstacles it crosses and each remaining free segment becomes a
//! `move` to its low end followed by a `paint` to its high end.

use super::types::{Obstacle, Segment, WallConfig, Waypoint};
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SweepDirection {
    LeftToRight,
    RightToLeft,
}

impl SweepDirection {
    fn flipped(self) -> Self {
        match self {
            SweepDirection::LeftToRight => SweepDirection::RightToLeft,
            SweepDirection::RightToLeft => SweepDirection::LeftToRight,
        }
    }

    fn endpoints(self, width: f64) -> (f64, f64) {
        match self {
            SweepDirection::LeftToRight => (0.0, width),
            SweepDirection::RightToLeft => (width, 0.0),
        }
    }
}

/// Generates the full waypoint sequence for a wall.
///
/// Fails with [`DomainError::InvalidConfig`] before producing anything when
/// the configuration cannot be swept.
pub fn generate_trajectory(config: &WallConfig) -> DomainResult<Vec<Waypoint>> {
    config.validate()?;

    let mut waypoints = Vec::new();
    let mut y = config.coverage_width / 2.0;
    let mut direction = SweepDirection::LeftToRight;

    while y < config.height {
        let (x_start, x_end) = direction.endpoints(config.width);

        // Segments come back low-to-high whichever way the stripe runs, so
        // the alternating direction never reorders the emitted endpoints.
        for segment in stripe_segments(x_start, x_end, y, &config.obstacles) {
            waypoints.push(Waypoint::travel(segment.start, y));
            waypoints.push(Waypoint::paint(segment.end, y));
        }

        y += config.coverage_width;
        direction = direction.flipped();
    }

    Ok(waypoints)
}

/// Free segments of the stripe at `y` between `x_start` and `x_end`.
///
/// Obstacles are subtracted one at a time in list order, each working on the
/// segments the previous one left behind. Each step removes the open interval
/// `(x, x + width)`, so overlapping obstacles yield the same segments in any order.
pub fn stripe_segments(x_start: f64, x_end: f64, y: f64, obstacles: &[Obstacle]) -> Vec<Segment> {
    obstacles
        .iter()
        .filter(|obstacle| obstacle.spans_stripe(y))
        .fold(vec![Segment::spanning(x_start, x_end)], |segments, obstacle| {
            subtract_obstacle(&segments, obstacle)
        })
}

fn subtract_obstacle(segments: &[Segment], obstacle: &Obstacle) -> Vec<Segment> {
    let mut remaining = Vec::with_capacity(segments.len() + 1);
    for segment in segments {
        if obstacle.x > segment.start {
            remaining.push(Segment::new(segment.start, obstacle.x.min(segment.end)));
        }
        if obstacle.right() < segment.end {
            remaining.push(Segment::new(obstacle.right().max(segment.start), segment.end));
        }
    }
    remaining
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Largest number of stripes a single request may ask for.
    pub max_stripes: usize,
    /// Upper bound on the waypoints a single request may produce.
    pub max_waypoints: usize,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            max_stripes: 1_000_000,
            max_waypoints: 10_000_000,
        }
    }
}

/// Planner with resource limits applied on top of [`generate_trajectory`].
#[derive(Debug, Clone, Default)]
pub struct CoveragePlanner {
    settings: PlannerSettings,
}

impl CoveragePlanner {
    pub fn new(settings: PlannerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn generate(&self, config: &WallConfig) -> DomainResult<Vec<Waypoint>> {
        config.validate()?;
        let stripes = estimated_stripes(config);
        if stripes > self.settings.max_stripes as f64 {
            return Err(DomainError::invalid_config(format!(
                "sweep would need about {:.0} stripes, limit is {}",
                stripes, self.settings.max_stripes
            )));
        }
        // Every obstacle can split a stripe at most once, adding one segment.
        let waypoints = stripes * (config.obstacles.len() as f64 + 1.0) * 2.0;
        if waypoints > self.settings.max_waypoints as f64 {
            return Err(DomainError::invalid_config(format!(
                "sweep could produce up to {:.0} waypoints, limit is {}",
                waypoints, self.settings.max_waypoints
            )));
        }
        generate_trajectory(config)
    }
}

fn estimated_stripes(config: &WallConfig) -> f64 {
    (config.height / config.coverage_width).ceil()
}
