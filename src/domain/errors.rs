//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Playback error: {0}")]
    Playback(String),

    /// The capture source has no more input (e.g. stdin reached EOF).
    #[error("Input closed")]
    InputClosed,

    #[error("Configuration error: {0}")]
    Config(String),
}
