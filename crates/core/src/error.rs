use thiserror::Error;

pub type DogUniverseResult<T> = Result<T, DogUniverseError>;

#[derive(Error, Debug)]
pub enum DogUniverseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
