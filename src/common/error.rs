use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid wall configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Trajectory not found: {id}")]
    TrajectoryNotFound { id: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

impl DomainError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Trajectory store error: {0}")]
    Storage(String),

    #[error("Planner task failed: {0}")]
    Planning(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

impl ApplicationError {
    /// True when the caller sent a configuration the planner refuses.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::Domain(DomainError::InvalidConfig { .. }))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
