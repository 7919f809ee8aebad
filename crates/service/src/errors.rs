use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn already_exists(entity: &str) -> Self { Self::Conflict(format!("{} already exists", entity)) }
}
