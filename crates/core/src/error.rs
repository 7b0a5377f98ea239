//! Error types shared by the collaborator boundaries

use thiserror::Error;

/// Errors raised by collaborators (dispatcher, store, reply generator)
#[derive(Error, Debug)]
pub enum Error {
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Reply generation error: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
