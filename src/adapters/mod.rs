//! Infrastructure adapters. Implement outbound ports.
//!
//! Console speech stand-ins, record stores, random sources, startup banner. Map errors to DomainError.

pub mod console;
pub mod persistence;
pub mod random;
pub mod ui;
