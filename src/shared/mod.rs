//! Cross-cutting helpers: configuration and utterance text matching.

pub mod config;
pub mod text;
