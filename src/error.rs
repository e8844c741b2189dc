//! Engine error taxonomy.
//!
//! Collaborator failures propagate unchanged; the engine performs no
//! internal retries.

use thiserror::Error;

/// Failure reported by an `AttemptStore` or `QuestionRepository` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the engine entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected before any collaborator call
    #[error("invalid test config: {0}")]
    InvalidConfig(String),

    /// The filtered candidate pool cannot satisfy the request
    #[error(
        "insufficient question pool{}: requested {requested}, available {available}",
        .subject.as_deref().map(|s| format!(" for {s}")).unwrap_or_default()
    )]
    InsufficientPool {
        requested: usize,
        available: usize,
        subject: Option<String>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
