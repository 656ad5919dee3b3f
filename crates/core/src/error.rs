use thiserror::Error;

/// Core engine errors.
///
/// Transient I/O and malformed data never show up here: adapters report them
/// as `anyhow::Error`, the engine logs them and degrades to an empty or stale
/// result. These variants are the only failures a caller is expected to
/// branch on.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine is not ready (state: {state})")]
    NotReady { state: String },

    #[error("Movie not found in catalog: {title} ({year})")]
    MovieNotFound { title: String, year: i32 },

    #[error("Invalid user name: {reason}")]
    InvalidUserName { reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
