//! Keyword router: picks the responder for an utterance, or the stop signal.
//!
//! Rules run in a fixed order and the first rule with a keyword contained in the
//! lowercased utterance wins. The stop rule is last, so "exit the study session" is a study request.

use crate::domain::DomainError;
use crate::shared::text::{contains_any, normalize};
use crate::usecases::context::AssistantContext;
use crate::usecases::responders::{
    FinanceResponder, LanguageResponder, MealPlannerResponder, ProductivityResponder, Responder,
    ResponderId, StudyResponder, SupportResponder, TechResponder, WellnessResponder,
};
use std::collections::HashMap;
use tracing::debug;

/// Reply for utterances no rule matches.
pub const FALLBACK_REPLY: &str = "I'm not sure how to help with that. Try asking about studies, wellness, tasks, support, finance, meals, tech issues, or language learning.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    Responder(ResponderId),
    Stop,
}

/// One routing rule: a target and the keywords that select it.
#[derive(Debug, Clone, Copy)]
pub struct RoutingRule {
    pub target: RuleTarget,
    pub keywords: &'static [&'static str],
}

impl RoutingRule {
    /// `normalized` must already be lowercase.
    pub fn matches(&self, normalized: &str) -> bool {
        contains_any(normalized, self.keywords)
    }
}

pub const RULES: &[RoutingRule] = &[
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::Study),
        keywords: &[
            "math", "science", "history", "study", "homework", "algebra", "geometry", "calculus",
            "physics", "chemistry", "biology", "world war", "ancient rome", "renaissance",
        ],
    },
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::Wellness),
        keywords: &["mindfulness", "meditation", "stress", "wellness", "relax"],
    },
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::Productivity),
        keywords: &["task", "reminder", "todo", "schedule", "productivity"],
    },
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::Support),
        keywords: &["support", "help", "problem", "issue"],
    },
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::Finance),
        keywords: &["money", "budget", "expense", "finance", "spend"],
    },
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::MealPlanner),
        keywords: &["meal", "food", "nutrition", "recipe", "diet"],
    },
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::Tech),
        keywords: &["tech", "computer", "wifi", "troubleshoot", "fix"],
    },
    RoutingRule {
        target: RuleTarget::Responder(ResponderId::Language),
        keywords: &[
            "language", "translate", "learn", "practice", "spanish", "french", "german",
        ],
    },
    RoutingRule {
        target: RuleTarget::Stop,
        keywords: &["stop", "quit", "exit"],
    },
];

/// Result of routing alone, before any responder runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Responder(ResponderId),
    Stop,
    Unhandled,
}

/// What the session should do with an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Speak(String),
    Stop,
}

pub struct Dispatcher {
    responders: HashMap<ResponderId, Box<dyn Responder>>,
}

impl Dispatcher {
    pub fn new(ctx: &AssistantContext) -> Self {
        let all: Vec<Box<dyn Responder>> = vec![
            Box::new(StudyResponder::new()),
            Box::new(WellnessResponder::new(ctx.rng.clone())),
            Box::new(ProductivityResponder::new(ctx.tasks.clone())),
            Box::new(SupportResponder::new()),
            Box::new(FinanceResponder::new(ctx.expenses.clone(), ctx.rng.clone())),
            Box::new(MealPlannerResponder::new(ctx.meals.clone(), ctx.rng.clone())),
            Box::new(TechResponder::new(ctx.rng.clone())),
            Box::new(LanguageResponder::new(ctx.rng.clone())),
        ];
        Self {
            responders: all.into_iter().map(|r| (r.id(), r)).collect(),
        }
    }

    /// First matching rule for `utterance`. Pure.
    pub fn route(&self, utterance: &str) -> Route {
        let normalized = normalize(utterance);
        match RULES.iter().find(|rule| rule.matches(&normalized)) {
            Some(RoutingRule {
                target: RuleTarget::Responder(id),
                ..
            }) => Route::Responder(*id),
            Some(RoutingRule {
                target: RuleTarget::Stop,
                ..
            }) => Route::Stop,
            None => Route::Unhandled,
        }
    }

    /// Route and, for a responder route, produce its reply. Store failures propagate.
    pub async fn dispatch(&self, utterance: &str) -> Result<Reply, DomainError> {
        let route = self.route(utterance);
        debug!(?route, "utterance routed");
        match route {
            Route::Stop => Ok(Reply::Stop),
            Route::Unhandled => Ok(Reply::Speak(FALLBACK_REPLY.to_string())),
            Route::Responder(id) => match self.responders.get(&id) {
                Some(responder) => Ok(Reply::Speak(responder.handle(utterance).await?)),
                None => Ok(Reply::Speak(FALLBACK_REPLY.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;
    use crate::adapters::random::{FixedRandom, ThreadRandom};
    use crate::ports::{RecordStore, TaskStore};
    use crate::usecases::responders::{language, meal_planner, study, wellness};
    use std::sync::Arc;

    fn dispatcher() -> (Dispatcher, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let ctx = AssistantContext::new(store.clone(), Arc::new(FixedRandom(0)));
        (Dispatcher::new(&ctx), store)
    }

    async fn speak(dispatcher: &Dispatcher, utterance: &str) -> String {
        match dispatcher.dispatch(utterance).await.unwrap() {
            Reply::Speak(text) => text,
            Reply::Stop => panic!("unexpected stop for {utterance:?}"),
        }
    }

    #[test]
    fn routes_in_rule_order() {
        let (dispatcher, _store) = dispatcher();
        let cases = [
            ("I'm stressed about my study", Route::Responder(ResponderId::Study)),
            ("exit the study session", Route::Responder(ResponderId::Study)),
            ("I need to relax", Route::Responder(ResponderId::Wellness)),
            ("LIST TASKS", Route::Responder(ResponderId::Productivity)),
            ("help with my account", Route::Responder(ResponderId::Support)),
            ("show expenses", Route::Responder(ResponderId::Finance)),
            ("suggest a recipe", Route::Responder(ResponderId::MealPlanner)),
            ("my wifi is down", Route::Responder(ResponderId::Tech)),
            ("tell me a spanish greeting", Route::Responder(ResponderId::Language)),
            ("what is algebra", Route::Responder(ResponderId::Study)),
            ("stop", Route::Stop),
            ("please quit now", Route::Stop),
            ("what's the weather", Route::Unhandled),
            ("", Route::Unhandled),
        ];
        for (utterance, expected) in cases {
            assert_eq!(dispatcher.route(utterance), expected, "{utterance:?}");
        }
    }

    #[test]
    fn every_responder_has_one_rule_and_stop_is_last() {
        for id in ResponderId::ALL {
            let count = RULES
                .iter()
                .filter(|r| r.target == RuleTarget::Responder(id))
                .count();
            assert_eq!(count, 1, "{id}");
        }
        assert_eq!(RULES.last().map(|r| r.target), Some(RuleTarget::Stop));
    }

    #[test]
    fn topic_and_language_names_are_routable() {
        let (dispatcher, _store) = dispatcher();
        for topic in study::topic_names() {
            assert_eq!(dispatcher.route(topic), Route::Responder(ResponderId::Study));
        }
        for name in language::language_names() {
            assert_eq!(
                dispatcher.route(name),
                Route::Responder(ResponderId::Language)
            );
        }
    }

    #[test]
    fn meal_planner_triggers_reach_the_meal_planner() {
        let (dispatcher, _store) = dispatcher();
        let phrases = meal_planner::LOG_PHRASES
            .iter()
            .chain(meal_planner::HISTORY_PHRASES);
        for phrase in phrases {
            let utterance = format!("please {phrase} for me");
            assert_eq!(
                dispatcher.route(&utterance),
                Route::Responder(ResponderId::MealPlanner),
                "{utterance:?}"
            );
        }
    }

    #[tokio::test]
    async fn meal_log_is_answered_by_the_meal_planner() {
        let (dispatcher, _store) = dispatcher();
        speak(&dispatcher, "log meal oatmeal with berries for breakfast").await;
        assert_eq!(
            speak(&dispatcher, "show my meal log").await,
            "You've logged 1 meal: Breakfast - Oatmeal with berries (300 calories). Total calories: 300."
        );
    }

    #[tokio::test]
    async fn stop_and_fallback() {
        let (dispatcher, _store) = dispatcher();
        assert_eq!(dispatcher.dispatch("Stop").await.unwrap(), Reply::Stop);
        assert_eq!(speak(&dispatcher, "sing me a song").await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn study_topic_reply() {
        let (dispatcher, _store) = dispatcher();
        let reply = speak(&dispatcher, "What is Algebra").await;
        assert!(
            reply.starts_with("Here's what I know about algebra: Algebra involves"),
            "{reply}"
        );
    }

    #[tokio::test]
    async fn spanish_greetings() {
        let (dispatcher, _store) = dispatcher();
        assert_eq!(
            speak(&dispatcher, "tell me a spanish greeting").await,
            "Here are some spanish greetings: hello is hola, goodbye is adiós, thank you is gracias"
        );
    }

    #[tokio::test]
    async fn expense_then_total() {
        let (dispatcher, _store) = dispatcher();
        speak(&dispatcher, "add expense spent 20 on food").await;
        let reply = speak(&dispatcher, "show expenses").await;
        assert!(reply.contains("$20.00"), "{reply}");
    }

    #[tokio::test]
    async fn listing_tasks_does_not_mutate() {
        let (dispatcher, store) = dispatcher();
        speak(&dispatcher, "add task water the plants").await;
        let first = speak(&dispatcher, "list tasks").await;
        let second = speak(&dispatcher, "list tasks").await;
        assert_eq!(first, second);
        assert_eq!(store.list_tasks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn random_replies_come_from_their_tables() {
        let store = Arc::new(MemoryStore::new());
        let ctx = AssistantContext::new(store, Arc::new(ThreadRandom));
        let dispatcher = Dispatcher::new(&ctx);
        for _ in 0..20 {
            let reply = speak(&dispatcher, "guide my meditation").await;
            assert!(wellness::MEDITATION_GUIDES.contains(&reply.as_str()), "{reply}");
        }
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let (dispatcher, store) = dispatcher();
        store.close().await;
        assert!(matches!(
            dispatcher.dispatch("list tasks").await,
            Err(DomainError::Store(_))
        ));
    }
}
