use super::trajectory::{TrajectoryId, TrajectoryRecord};
use super::types::Waypoint;
use crate::common::DomainResult;
use async_trait::async_trait;

/// Port for persisting generated trajectories (in-memory, file, postgres, ...).
#[async_trait]
pub trait TrajectoryStore: Send + Sync {
    /// Stores the record and its waypoints unless the id is already present.
    /// Returns `false` when an entry existed and nothing was written.
    async fn save_trajectory(&self, record: TrajectoryRecord, waypoints: &[Waypoint]) -> DomainResult<bool>;

    /// Waypoints of a stored trajectory ordered by `(y, x)`. Empty for unknown ids.
    async fn load_waypoints(&self, id: &TrajectoryId) -> DomainResult<Vec<Waypoint>>;

    async fn load_record(&self, id: &TrajectoryId) -> DomainResult<Option<TrajectoryRecord>>;
}
