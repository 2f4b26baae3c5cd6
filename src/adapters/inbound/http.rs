//! HTTP surface of the planner.
//!
//! | Method | Path                              | Body / result                       |
//! |--------|-----------------------------------|-------------------------------------|
//! | GET    | `/api/health`                     | `{"status": "ok"}`                  |
//! | POST   | `/api/trajectories`               | wall config in, waypoints out       |
//! | GET    | `/api/trajectories/:id`           | stored waypoints ordered by (y, x)  |
//! | GET    | `/api/trajectories/:id/summary`   | stored trajectory record            |
//! | GET    | `/api/metrics`                    | placeholder status                  |

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::application::TrajectoryService;
use crate::common::{ApplicationError, DomainError};
use crate::domains::coverage::{Obstacle, TrajectoryId, WallConfig};

/// Response header carrying the id a trajectory was stored under.
pub const TRAJECTORY_ID_HEADER: &str = "x-trajectory-id";

/// Inbound wall description. `coverage_width` falls back to the configured default.
#[derive(Debug, Clone, Deserialize)]
pub struct TrajectoryRequest {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub coverage_width: Option<f64>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl TrajectoryRequest {
    pub fn into_config(self, default_coverage_width: f64) -> WallConfig {
        WallConfig {
            width: self.width,
            height: self.height,
            coverage_width: self.coverage_width.unwrap_or(default_coverage_width),
            obstacles: self.obstacles,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TrajectoryService>,
    pub default_coverage_width: f64,
}

impl AppState {
    pub fn new(service: Arc<TrajectoryService>, default_coverage_width: f64) -> Self {
        Self {
            service,
            default_coverage_width,
        }
    }
}

/// Error wrapper mapping application failures onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            ApplicationError::Domain(DomainError::InvalidConfig { reason }) => {
                (StatusCode::BAD_REQUEST, reason.clone())
            }
            ApplicationError::Domain(DomainError::TrajectoryNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Trajectory not found".to_string())
            }
            other => {
                error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub fn router(state: AppState, allow_any_origin: bool) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/metrics", get(get_metrics))
        .route("/api/trajectories", post(create_trajectory))
        .route("/api/trajectories/:id", get(get_trajectory))
        .route("/api/trajectories/:id/summary", get(get_trajectory_summary))
        .with_state(state);

    if allow_any_origin {
        app = app.layer(middleware::from_fn(cors_any_origin));
    }
    app.layer(middleware::from_fn(log_timing))
}

/// Serves `app` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_metrics() -> Json<serde_json::Value> {
    Json(json!({ "status": "metrics endpoint ready" }))
}

pub async fn create_trajectory(
    State(state): State<AppState>,
    Json(request): Json<TrajectoryRequest>,
) -> Result<Response, ApiError> {
    let config = request.into_config(state.default_coverage_width);
    let planned = state.service.create_trajectory(config).await?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(planned.id.as_str()) {
        headers.insert(HeaderName::from_static(TRAJECTORY_ID_HEADER), value);
    }
    Ok((headers, Json(planned.waypoints)).into_response())
}

pub async fn get_trajectory(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let waypoints = state.service.get_trajectory(&TrajectoryId::from(id)).await?;
    Ok(Json(waypoints).into_response())
}

pub async fn get_trajectory_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state.service.get_record(&TrajectoryId::from(id)).await?;
    Ok(Json(record).into_response())
}

/// Wraps every request in a span with a fresh request id and logs its outcome and duration.
async fn log_timing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("request", request_id = %Uuid::new_v4(), %method, %path);

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    span.in_scope(|| {
        info!(status = response.status().as_u16(), elapsed_ms, "request completed");
    });
    response
}

async fn cors_any_origin(request: Request, next: Next) -> Response {
    let mut response = if *request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(TRAJECTORY_ID_HEADER),
    );
    response
}
