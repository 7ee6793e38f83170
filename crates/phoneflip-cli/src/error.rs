use std::io;

use phoneflip_core::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] phoneflip_core::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    /// A marketplace operation failed; carries the message shown to the user.
    #[error("{0}")]
    Request(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
