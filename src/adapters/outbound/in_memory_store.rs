use crate::common::DomainResult;
use crate::domains::coverage::{sort_for_retrieval, TrajectoryId, TrajectoryRecord, TrajectoryStore, Waypoint};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A trajectory as the non-SQL stores keep it: the summary plus waypoints in
/// generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTrajectory {
    pub record: TrajectoryRecord,
    pub waypoints: Vec<Waypoint>,
}

impl StoredTrajectory {
    pub fn waypoints_for_retrieval(&self) -> Vec<Waypoint> {
        let mut waypoints = self.waypoints.clone();
        sort_for_retrieval(&mut waypoints);
        waypoints
    }
}

/// In-memory trajectory store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryTrajectoryStore {
    trajectories: RwLock<HashMap<TrajectoryId, StoredTrajectory>>,
}

impl InMemoryTrajectoryStore {
    pub fn new() -> Self {
        Self {
            trajectories: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.trajectories.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.trajectories.read().await.is_empty()
    }
}

#[async_trait]
impl TrajectoryStore for InMemoryTrajectoryStore {
    async fn save_trajectory(&self, record: TrajectoryRecord, waypoints: &[Waypoint]) -> DomainResult<bool> {
        let mut store = self.trajectories.write().await;
        if store.contains_key(&record.id) {
            return Ok(false);
        }
        store.insert(
            record.id.clone(),
            StoredTrajectory {
                record,
                waypoints: waypoints.to_vec(),
            },
        );
        Ok(true)
    }

    async fn load_waypoints(&self, id: &TrajectoryId) -> DomainResult<Vec<Waypoint>> {
        let store = self.trajectories.read().await;
        Ok(store
            .get(id)
            .map(StoredTrajectory::waypoints_for_retrieval)
            .unwrap_or_default())
    }

    async fn load_record(&self, id: &TrajectoryId) -> DomainResult<Option<TrajectoryRecord>> {
        let store = self.trajectories.read().await;
        Ok(store.get(id).map(|stored| stored.record.clone()))
    }
}
