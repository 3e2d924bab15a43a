use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The call context's worker task has shut down; no further commands
    /// can be delivered.
    #[error("Call context closed")]
    ContextClosed,
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
