use std::sync::Arc;
use std::time::Instant;

use crate::common::{ApplicationError, ApplicationResult, DomainError};
use crate::domains::coverage::{
    metrics::round_to, CoveragePlanner, TrajectoryId, TrajectoryRecord, TrajectoryStore, WallConfig, Waypoint,
};
use crate::domains::logger::DynLogger;

/// Result of planning one wall.
#[derive(Debug, Clone)]
pub struct PlannedTrajectory {
    pub id: TrajectoryId,
    pub waypoints: Vec<Waypoint>,
    /// False when an identical configuration had already been stored.
    pub newly_stored: bool,
}

pub struct TrajectoryService {
    planner: CoveragePlanner,
    store: Arc<dyn TrajectoryStore>,
    logger: DynLogger,
}

impl TrajectoryService {
    pub fn new(planner: CoveragePlanner, store: Arc<dyn TrajectoryStore>, logger: DynLogger) -> Self {
        Self { planner, store, logger }
    }

    /// Plans the wall, stores the result under its content hash and returns it.
    pub async fn create_trajectory(&self, config: WallConfig) -> ApplicationResult<PlannedTrajectory> {
        let id = TrajectoryId::from_config(&config);

        // Planning is CPU-bound; keep it off the async workers.
        let planner = self.planner.clone();
        let plan_config = config.clone();
        let (planned, elapsed) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let planned = planner.generate(&plan_config);
            (planned, start.elapsed())
        })
        .await
        .map_err(|e| {
            self.logger.error(&format!("Planner task for {} failed: {}", id, e));
            ApplicationError::Planning(e.to_string())
        })?;

        let waypoints = match planned {
            Ok(waypoints) => waypoints,
            Err(e) => {
                self.logger.error(&format!("Trajectory generation failed: {}", e));
                return Err(e.into());
            }
        };

        let duration = round_to(elapsed.as_secs_f64(), 3);
        self.logger.info(&format!(
            "Trajectory {} generated with {} obstacles in {}s",
            id,
            config.obstacles.len(),
            duration
        ));

        let record = TrajectoryRecord::new(id.clone(), &config, &waypoints, duration);
        let newly_stored = self
            .store
            .save_trajectory(record, &waypoints)
            .await
            .map_err(|e| {
                self.logger.error(&format!("Saving trajectory {} failed: {}", id, e));
                ApplicationError::Storage(e.to_string())
            })?;
        if !newly_stored {
            self.logger.info(&format!("Trajectory {} already stored, skipping insert", id));
        }

        Ok(PlannedTrajectory {
            id,
            waypoints,
            newly_stored,
        })
    }

    /// Stored waypoints ordered by `(y, x)`.
    pub async fn get_trajectory(&self, id: &TrajectoryId) -> ApplicationResult<Vec<Waypoint>> {
        // The record decides existence; a stored trajectory may have no waypoints.
        self.get_record(id).await?;
        self.store
            .load_waypoints(id)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))
    }

    pub async fn get_record(&self, id: &TrajectoryId) -> ApplicationResult<TrajectoryRecord> {
        self.store
            .load_record(id)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))?
            .ok_or_else(|| DomainError::TrajectoryNotFound { id: id.to_string() }.into())
    }
}
