use thiserror::Error;

use coldstore_core::DomainError;

/// Errors outside the domain layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Stable machine-readable code used in shell responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Domain(DomainError::Validation(_)) => "validation_error",
            AppError::Domain(DomainError::InvalidId(_)) => "invalid_id",
            AppError::Domain(DomainError::InvariantViolation(_)) => "invariant_violation",
            AppError::Request(_) => "invalid_request",
            AppError::Io(_) => "io_error",
        }
    }
}
