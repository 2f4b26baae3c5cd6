use super::metrics::TrajectoryMetrics;
use super::types::{WallConfig, Waypoint};
use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content hash of a wall configuration, used as the idempotency key.
///
/// Only width, height and the ordered obstacle list take part; two requests
/// that differ in coverage width alone share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrajectoryId(String);

impl TrajectoryId {
    pub fn from_config(config: &WallConfig) -> Self {
        let digest = md5::compute(canonical_key(config).as_bytes());
        Self(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TrajectoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TrajectoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TrajectoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonical_key(config: &WallConfig) -> String {
    let obstacles = config
        .obstacles
        .iter()
        .map(|o| {
            format!(
                "({}, {}, {}, {})",
                repr_float(o.x),
                repr_float(o.y),
                repr_float(o.width),
                repr_float(o.height)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}-{}-[{}]", repr_float(config.width), repr_float(config.height), obstacles)
}

/// Shortest round-trip form with a trailing `.0` on whole numbers and a signed,
/// two-digit exponent (`1e-05`, `1.5e+16`), so existing ids stay valid.
///
/// `{:?}` already switches to exponent form below `1e-4` and from `1e16` on,
/// only the exponent spelling differs.
fn repr_float(value: f64) -> String {
    let debug = format!("{:?}", value);
    let Some((mantissa, exponent)) = debug.split_once('e') else {
        return debug;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => format!("{}e{}{:02}", mantissa, if exp < 0 { '-' } else { '+' }, exp.abs()),
        Err(_) => debug,
    }
}

/// Summary row persisted next to a trajectory's waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub id: TrajectoryId,
    pub width: f64,
    pub height: f64,
    pub obstacle_count: usize,
    pub coverage_width: f64,
    pub coverage_percent: f64,
    pub path_length: f64,
    /// Generation time in seconds.
    pub duration: f64,
    pub timestamp: DateTime<Utc>,
}

impl TrajectoryRecord {
    pub fn new(id: TrajectoryId, config: &WallConfig, waypoints: &[Waypoint], duration: f64) -> Self {
        let metrics = TrajectoryMetrics::compute(waypoints, config);
        Self {
            id,
            width: config.width,
            height: config.height,
            obstacle_count: config.obstacles.len(),
            coverage_width: config.coverage_width,
            coverage_percent: metrics.coverage_percent,
            path_length: metrics.path_length,
            duration,
            timestamp: Utc::now(),
        }
    }

    pub fn metrics(&self) -> TrajectoryMetrics {
        TrajectoryMetrics {
            path_length: self.path_length,
            coverage_percent: self.coverage_percent,
        }
    }
}

/// Reorders waypoints the way stored trajectories are read back: by `y`, then `x`.
///
/// The sort is stable, so waypoints at the same spot keep their generation order.
pub fn sort_for_retrieval(waypoints: &mut [Waypoint]) {
    waypoints.sort_by_key(|wp| (OrderedFloat(wp.y), OrderedFloat(wp.x)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::coverage::types::Obstacle;

    #[test]
    fn canonical_key_keeps_trailing_zero_on_whole_numbers() {
        let config = WallConfig::new(5.0, 3.0, 0.15, vec![Obstacle::new(2.0, 0.0, 1.0, 1.5)]);
        assert_eq!(canonical_key(&config), "5.0-3.0-[(2.0, 0.0, 1.0, 1.5)]");

        let empty = WallConfig::new(5.0, 3.0, 0.15, vec![]);
        assert_eq!(canonical_key(&empty), "5.0-3.0-[]");
    }

    #[test]
    fn canonical_key_spells_exponents_with_sign_and_two_digits() {
        let config = WallConfig::new(1e16, 3.0, 0.15, vec![Obstacle::new(1e-5, 0.0001, 1.5e-7, 2.5e20)]);
        assert_eq!(
            canonical_key(&config),
            "1e+16-3.0-[(1e-05, 0.0001, 1.5e-07, 2.5e+20)]"
        );
        assert_eq!(repr_float(1e100), "1e+100");
        assert_eq!(repr_float(123456789012345.0), "123456789012345.0");
        assert_eq!(repr_float(-0.5), "-0.5");
    }

    #[test]
    fn id_matches_known_digest() {
        let config = WallConfig::new(5.0, 3.0, 0.15, vec![]);
        let expected = format!("{:x}", md5::compute(b"5.0-3.0-[]"));
        assert_eq!(TrajectoryId::from_config(&config).as_str(), expected);
    }

    #[test]
    fn id_is_stable_and_ignores_coverage_width() {
        let a = WallConfig::new(5.0, 3.0, 0.15, vec![Obstacle::new(1.0, 1.0, 1.0, 1.0)]);
        let b = WallConfig::new(5.0, 3.0, 0.5, vec![Obstacle::new(1.0, 1.0, 1.0, 1.0)]);
        let id = TrajectoryId::from_config(&a);
        assert_eq!(id, TrajectoryId::from_config(&a));
        assert_eq!(id, TrajectoryId::from_config(&b));
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn id_depends_on_obstacle_order() {
        let first = Obstacle::new(1.0, 1.0, 1.0, 1.0);
        let second = Obstacle::new(3.0, 0.0, 0.5, 0.5);
        let a = WallConfig::new(5.0, 3.0, 0.15, vec![first, second]);
        let b = WallConfig::new(5.0, 3.0, 0.15, vec![second, first]);
        assert_ne!(TrajectoryId::from_config(&a), TrajectoryId::from_config(&b));
    }

    #[test]
    fn retrieval_order_is_y_then_x() {
        let mut waypoints = vec![
            Waypoint::paint(5.0, 1.5),
            Waypoint::travel(0.0, 1.5),
            Waypoint::paint(2.0, 0.5),
            Waypoint::travel(0.0, 0.5),
        ];
        sort_for_retrieval(&mut waypoints);
        let coords: Vec<(f64, f64)> = waypoints.iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(coords, vec![(0.0, 0.5), (2.0, 0.5), (0.0, 1.5), (5.0, 1.5)]);
    }
}
