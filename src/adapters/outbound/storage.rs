use super::{FileTrajectoryStore, InMemoryTrajectoryStore, PostgresTrajectoryStore};
use crate::common::DomainResult;
use crate::config::{PostgresConfig, StorageBackend, StorageConfig};
use crate::domains::coverage::TrajectoryStore;
use std::sync::Arc;

/// Builds the trajectory store selected by `storage.backend`.
pub async fn connect_store(
    storage: &StorageConfig,
    postgres: &PostgresConfig,
) -> DomainResult<Arc<dyn TrajectoryStore>> {
    let store: Arc<dyn TrajectoryStore> = match storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryTrajectoryStore::new()),
        StorageBackend::File => Arc::new(FileTrajectoryStore::new(storage.data_dir.clone())),
        StorageBackend::Postgres => Arc::new(PostgresTrajectoryStore::new(postgres).await?),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::coverage::TrajectoryId;

    #[tokio::test]
    async fn memory_and_file_backends_need_no_server() {
        let dir = tempfile::tempdir().unwrap();
        let postgres = PostgresConfig::default();
        for backend in [StorageBackend::Memory, StorageBackend::File] {
            let storage = StorageConfig {
                backend,
                data_dir: dir.path().join("trajectories"),
            };
            let store = connect_store(&storage, &postgres).await.unwrap();
            let id = TrajectoryId::from("0123abcd");
            assert!(store.load_record(&id).await.unwrap().is_none());
        }
    }
}
