//! Inbound port. The binary calls into the application.

use crate::domain::DomainError;

/// Input port: the process entry point runs one assistant session.
#[async_trait::async_trait]
pub trait SessionPort: Send + Sync {
    /// Greet, then capture and answer utterances until a stop phrase or end of input.
    async fn run(&self) -> Result<(), DomainError>;
}
