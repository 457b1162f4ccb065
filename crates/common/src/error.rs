use thiserror::Error;

#[derive(Debug, Error)]
pub enum CivicError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("validation error: {0}")]
    Validation(String),
}

pub type CivicResult<T> = Result<T, CivicError>;
