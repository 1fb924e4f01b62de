//! Topic responders. Each maps an utterance in its domain to a reply string.
//!
//! Every responder lowercases its input again even though the dispatcher already did;
//! callers may hand responders raw text.

pub mod finance;
pub mod language;
pub mod meal_planner;
pub mod productivity;
pub mod study;
pub mod support;
pub mod tech;
pub mod wellness;

pub use finance::FinanceResponder;
pub use language::LanguageResponder;
pub use meal_planner::MealPlannerResponder;
pub use productivity::ProductivityResponder;
pub use study::StudyResponder;
pub use support::SupportResponder;
pub use tech::TechResponder;
pub use wellness::WellnessResponder;

use crate::domain::DomainError;
use std::fmt;

/// Identifies one of the eight topic domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponderId {
    Study,
    Wellness,
    Productivity,
    Support,
    Finance,
    MealPlanner,
    Tech,
    Language,
}

impl ResponderId {
    pub const ALL: [ResponderId; 8] = [
        ResponderId::Study,
        ResponderId::Wellness,
        ResponderId::Productivity,
        ResponderId::Support,
        ResponderId::Finance,
        ResponderId::MealPlanner,
        ResponderId::Tech,
        ResponderId::Language,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponderId::Study => "study",
            ResponderId::Wellness => "wellness",
            ResponderId::Productivity => "productivity",
            ResponderId::Support => "support",
            ResponderId::Finance => "finance",
            ResponderId::MealPlanner => "meal_planner",
            ResponderId::Tech => "tech",
            ResponderId::Language => "language",
        }
    }
}

impl fmt::Display for ResponderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One topic handler. Stateless apart from the store handle a few of them own.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    fn id(&self) -> ResponderId;

    /// Produce the reply for `utterance`. Only store failures are errors;
    /// an unrecognized request gets the responder's generic prompt.
    async fn handle(&self, utterance: &str) -> Result<String, DomainError>;
}
