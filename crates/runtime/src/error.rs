//! Error types surfaced by the runtime API.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("map '{0}' is not in the loaded content")]
    UnknownMap(String),

    #[error("no map has been entered yet")]
    NoActiveMap,

    #[error("simulation requires content to be configured before building")]
    MissingContent,

    #[error("session serialization failed")]
    Serialization(#[from] serde_json::Error),
}
