use thiserror::Error;

use waypost_clients::ClientError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] ClientError),
}

impl AppError {
    /// HTTP status code the embedding API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::Upstream(_) => 502,
        }
    }
}
