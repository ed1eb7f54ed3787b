use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, DashError>;
