//! Application use cases. Orchestrate domain logic via ports.

pub mod context;
pub mod dispatcher;
pub mod responders;
pub mod session_service;

pub use context::AssistantContext;
pub use dispatcher::{Dispatcher, Reply, Route};
pub use session_service::{SessionExit, SessionService, SessionState, run_until_stopped};
