use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangular obstacle on the wall, anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a stripe at `y` touches this obstacle. Both edges are inclusive.
    pub fn spans_stripe(&self, y: f64) -> bool {
        self.y <= y && y <= self.top()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    pub width: f64,
    pub height: f64,
    pub coverage_width: f64,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl WallConfig {
    pub fn new(width: f64, height: f64, coverage_width: f64, obstacles: Vec<Obstacle>) -> Self {
        Self { width, height, coverage_width, obstacles }
    }

    /// Rejects configurations the stripe sweep cannot make sense of.
    ///
    /// A non-positive coverage width would never advance the sweep, so it is
    /// refused before any waypoint is produced.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.coverage_width.is_finite() || self.coverage_width <= 0.0 {
            return Err(DomainError::invalid_config(format!(
                "coverage_width must be a positive number, got {}",
                self.coverage_width
            )));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(DomainError::invalid_config(format!(
                "wall width must be a positive number, got {}",
                self.width
            )));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(DomainError::invalid_config(format!(
                "wall height must be a positive number, got {}",
                self.height
            )));
        }
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if !obstacle.x.is_finite() || !obstacle.y.is_finite() {
                return Err(DomainError::invalid_config(format!(
                    "obstacle {} has a non-finite position ({}, {})",
                    index, obstacle.x, obstacle.y
                )));
            }
            if !obstacle.width.is_finite() || obstacle.width <= 0.0 {
                return Err(DomainError::invalid_config(format!(
                    "obstacle {} width must be a positive number, got {}",
                    index, obstacle.width
                )));
            }
            if !obstacle.height.is_finite() || obstacle.height <= 0.0 {
                return Err(DomainError::invalid_config(format!(
                    "obstacle {} height must be a positive number, got {}",
                    index, obstacle.height
                )));
            }
        }
        Ok(())
    }

    /// Number of stripes the sweep will visit, counted the same way the
    /// planner advances `y`.
    pub fn stripe_count(&self) -> usize {
        let mut count = 0usize;
        let mut y = self.coverage_width / 2.0;
        while y < self.height {
            count += 1;
            y += self.coverage_width;
        }
        count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Travel without painting.
    Move,
    Paint,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Paint => "paint",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(Action::Move),
            "paint" => Ok(Action::Paint),
            other => Err(DomainError::InfrastructureError(format!(
                "unknown waypoint action '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub action: Action,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, action: Action) -> Self {
        Self { x, y, action }
    }

    pub fn travel(x: f64, y: f64) -> Self {
        Self::new(x, y, Action::Move)
    }

    pub fn paint(x: f64, y: f64) -> Self {
        Self::new(x, y, Action::Paint)
    }
}

/// Obstacle-free run of a stripe, always stored low to high.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Builds the segment covering two stripe endpoints in either order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self { start: a.min(b), end: a.max(b) }
    }
}
