use super::in_memory_store::StoredTrajectory;
use crate::common::{DomainError, DomainResult};
use crate::domains::coverage::{TrajectoryId, TrajectoryRecord, TrajectoryStore, Waypoint};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// File-based trajectory store.
///
/// Each trajectory is one JSON document named after its id. Documents are
/// written to a scratch file first and then hard-linked into place, so a
/// concurrent duplicate save finds the final name taken and backs off, and a
/// reader never sees a half-written file.
pub struct FileTrajectoryStore {
    base_path: PathBuf,
}

impl FileTrajectoryStore {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// `None` for ids that are not plain hash strings, which also keeps
    /// request-supplied ids from escaping the base directory.
    fn file_path(&self, id: &TrajectoryId) -> Option<PathBuf> {
        let raw = id.as_str();
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return None;
        }
        Some(self.base_path.join(format!("{}.json", raw)))
    }

    async fn ensure_base_dir(&self) -> DomainResult<()> {
        tokio::fs::create_dir_all(&self.base_path).await.map_err(|e| {
            DomainError::InfrastructureError(format!(
                "Failed to create trajectory directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    async fn read(&self, id: &TrajectoryId) -> DomainResult<Option<StoredTrajectory>> {
        let Some(path) = self.file_path(id) else {
            return Ok(None);
        };
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::InfrastructureError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let stored: StoredTrajectory = serde_json::from_str(&content)?;
        Ok(Some(stored))
    }
}

#[async_trait]
impl TrajectoryStore for FileTrajectoryStore {
    async fn save_trajectory(&self, record: TrajectoryRecord, waypoints: &[Waypoint]) -> DomainResult<bool> {
        let path = self.file_path(&record.id).ok_or_else(|| {
            DomainError::InfrastructureError(format!("Trajectory id '{}' is not storable", record.id))
        })?;
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(false);
        }
        self.ensure_base_dir().await?;

        let stored = StoredTrajectory {
            record,
            waypoints: waypoints.to_vec(),
        };
        let json = serde_json::to_vec(&stored)?;

        let scratch = self.base_path.join(format!(".{}.{}.tmp", stored.record.id, Uuid::new_v4()));
        let mut file = tokio::fs::File::create(&scratch)
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to create {}: {}", scratch.display(), e)))?;
        file.write_all(&json)
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to write trajectory: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to flush trajectory: {}", e)))?;
        drop(file);

        let linked = tokio::fs::hard_link(&scratch, &path).await;
        // The scratch name is only a staging area; losing it is harmless.
        let _ = tokio::fs::remove_file(&scratch).await;
        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(DomainError::InfrastructureError(format!(
                "Failed to publish {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn load_waypoints(&self, id: &TrajectoryId) -> DomainResult<Vec<Waypoint>> {
        Ok(self
            .read(id)
            .await?
            .map(|stored| stored.waypoints_for_retrieval())
            .unwrap_or_default())
    }

    async fn load_record(&self, id: &TrajectoryId) -> DomainResult<Option<TrajectoryRecord>> {
        Ok(self.read(id).await?.map(|stored| stored.record))
    }
}
