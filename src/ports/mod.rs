//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the process entry point into the application
//! - Outbound: Called by the application into infrastructure

pub mod inbound;
pub mod outbound;
pub mod random;

pub use inbound::SessionPort;
pub use outbound::{CapturePort, ExpenseStore, MealStore, PlaybackPort, RecordStore, TaskStore};
pub use random::{RandomSource, pick};
