use crate::common::{DomainError, DomainResult};
use crate::config::PostgresConfig;
use crate::domains::coverage::{Action, TrajectoryId, TrajectoryRecord, TrajectoryStore, Waypoint};
use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use std::fmt::Display;
use tokio_postgres::NoTls;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS trajectories (
        id TEXT PRIMARY KEY,
        width DOUBLE PRECISION NOT NULL,
        height DOUBLE PRECISION NOT NULL,
        obstacle_count INTEGER NOT NULL,
        coverage_width DOUBLE PRECISION NOT NULL,
        coverage_percent DOUBLE PRECISION NOT NULL,
        path_length DOUBLE PRECISION NOT NULL,
        duration DOUBLE PRECISION NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS waypoints (
        trajectory_id TEXT NOT NULL REFERENCES trajectories(id) ON DELETE CASCADE,
        seq INTEGER NOT NULL,
        x DOUBLE PRECISION NOT NULL,
        y DOUBLE PRECISION NOT NULL,
        action TEXT NOT NULL CHECK (action IN ('move', 'paint')),
        PRIMARY KEY (trajectory_id, seq)
    );

    CREATE INDEX IF NOT EXISTS idx_waypoints_retrieval
    ON waypoints(trajectory_id, y, x);
"#;

fn infra<E: Display>(context: &'static str) -> impl FnOnce(E) -> DomainError {
    move |e| DomainError::InfrastructureError(format!("{}: {}", context, e))
}

pub struct PostgresTrajectoryStore {
    pool: Pool,
}

impl PostgresTrajectoryStore {
    pub async fn new(config: &PostgresConfig) -> DomainResult<Self> {
        let mut pg_config = Config::new();
        pg_config.host = Some(config.host.clone());
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database.clone());
        pg_config.user = Some(config.username.clone());
        pg_config.password = Some(config.password.clone());
        pg_config.pool = Some(PoolConfig::new(config.max_connections.max(1) as usize));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(infra("Failed to create PostgreSQL pool"))?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and makes sure the schema is in place.
    pub async fn from_pool(pool: Pool) -> DomainResult<Self> {
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> DomainResult<()> {
        let client = self.pool.get().await.map_err(infra("Failed to get database connection"))?;
        client
            .batch_execute(SCHEMA)
            .await
            .map_err(infra("Failed to initialize database schema"))?;
        Ok(())
    }
}

#[async_trait]
impl TrajectoryStore for PostgresTrajectoryStore {
    async fn save_trajectory(&self, record: TrajectoryRecord, waypoints: &[Waypoint]) -> DomainResult<bool> {
        let obstacle_count = i32::try_from(record.obstacle_count).map_err(infra("Obstacle count out of range"))?;
        let seqs = (0..waypoints.len())
            .map(i32::try_from)
            .collect::<Result<Vec<i32>, _>>()
            .map_err(infra("Too many waypoints"))?;
        let xs: Vec<f64> = waypoints.iter().map(|wp| wp.x).collect();
        let ys: Vec<f64> = waypoints.iter().map(|wp| wp.y).collect();
        let actions: Vec<&str> = waypoints.iter().map(|wp| wp.action.as_str()).collect();
        let id = record.id.as_str();

        let mut client = self.pool.get().await.map_err(infra("Failed to get database connection"))?;
        let tx = client.transaction().await.map_err(infra("Failed to open transaction"))?;

        // Insert-if-absent on the primary key; the loser of a race sees 0 rows.
        let inserted = tx
            .execute(
                "INSERT INTO trajectories (id, width, height, obstacle_count, coverage_width,
                     coverage_percent, path_length, duration, timestamp)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                 ON CONFLICT (id) DO NOTHING",
                &[
                    &id,
                    &record.width,
                    &record.height,
                    &obstacle_count,
                    &record.coverage_width,
                    &record.coverage_percent,
                    &record.path_length,
                    &record.duration,
                    &record.timestamp,
                ],
            )
            .await
            .map_err(infra("Failed to insert trajectory"))?;

        if inserted == 0 {
            return Ok(false);
        }

        tx.execute(
            "INSERT INTO waypoints (trajectory_id, seq, x, y, action)
             SELECT $1::TEXT, w.seq, w.x, w.y, w.action
             FROM UNNEST($2::INTEGER[], $3::DOUBLE PRECISION[], $4::DOUBLE PRECISION[], $5::TEXT[])
                 AS w(seq, x, y, action)",
            &[&id, &seqs, &xs, &ys, &actions],
        )
        .await
        .map_err(infra("Failed to insert waypoints"))?;

        tx.commit().await.map_err(infra("Failed to commit trajectory"))?;
        Ok(true)
    }

    async fn load_waypoints(&self, id: &TrajectoryId) -> DomainResult<Vec<Waypoint>> {
        let client = self.pool.get().await.map_err(infra("Failed to get database connection"))?;
        let rows = client
            .query(
                "SELECT x, y, action FROM waypoints
                 WHERE trajectory_id = $1
                 ORDER BY y, x, seq",
                &[&id.as_str()],
            )
            .await
            .map_err(infra("Failed to load waypoints"))?;

        rows.iter()
            .map(|row| -> DomainResult<Waypoint> {
                let action: Action = row.get::<_, &str>(2).parse()?;
                Ok(Waypoint::new(row.get(0), row.get(1), action))
            })
            .collect()
    }

    async fn load_record(&self, id: &TrajectoryId) -> DomainResult<Option<TrajectoryRecord>> {
        let client = self.pool.get().await.map_err(infra("Failed to get database connection"))?;
        let row = client
            .query_opt(
                "SELECT id, width, height, obstacle_count, coverage_width, coverage_percent,
                        path_length, duration, timestamp
                 FROM trajectories WHERE id = $1",
                &[&id.as_str()],
            )
            .await
            .map_err(infra("Failed to load trajectory"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let obstacle_count: i32 = row.get(3);
        Ok(Some(TrajectoryRecord {
            id: TrajectoryId::from(row.get::<_, String>(0)),
            width: row.get(1),
            height: row.get(2),
            obstacle_count: usize::try_from(obstacle_count).map_err(infra("Negative obstacle count"))?,
            coverage_width: row.get(4),
            coverage_percent: row.get(5),
            path_length: row.get(6),
            duration: row.get(7),
            timestamp: row.get(8),
        }))
    }
}
