//! Study help: short explanations for math, science and history topics.

use super::{Responder, ResponderId};
use crate::domain::DomainError;
use crate::shared::text::{contains_any, normalize};

const MATH_TOPICS: &[(&str, &str)] = &[
    (
        "algebra",
        "Algebra involves working with variables and equations. Key concepts include solving for x, factoring, and working with polynomials.",
    ),
    (
        "geometry",
        "Geometry deals with shapes, angles, and spatial relationships. Important concepts include area, perimeter, and the Pythagorean theorem.",
    ),
    (
        "calculus",
        "Calculus involves derivatives and integrals. It helps us understand rates of change and areas under curves.",
    ),
];

const SCIENCE_TOPICS: &[(&str, &str)] = &[
    (
        "physics",
        "Physics studies matter, energy, and their interactions. Key areas include mechanics, thermodynamics, and electromagnetism.",
    ),
    (
        "chemistry",
        "Chemistry focuses on atoms, molecules, and chemical reactions. Important concepts include the periodic table and chemical bonding.",
    ),
    (
        "biology",
        "Biology is the study of living organisms. It covers topics like cells, genetics, evolution, and ecosystems.",
    ),
];

const HISTORY_TOPICS: &[(&str, &str)] = &[
    (
        "world war",
        "World War 1 occurred from 1914-1918, and World War 2 from 1939-1945. These conflicts reshaped global politics and society.",
    ),
    (
        "ancient rome",
        "Ancient Rome was a powerful civilization that lasted from 753 BC to 476 AD, known for its military, law, and engineering.",
    ),
    (
        "renaissance",
        "The Renaissance was a period of cultural rebirth in Europe from the 14th to 17th centuries, marked by advances in art and science.",
    ),
];

const ARITHMETIC_MARKERS: &[&str] = &["+", "-", "*", "/", "plus", "minus", "times", "divided"];

const SOLVE_REPLY: &str = "I can help with basic math problems. For complex calculations, I recommend breaking them down into smaller steps.";

const GENERIC_REPLY: &str =
    "I can help with math, science, and history topics. What specific subject would you like to learn about?";

/// Topic names, in lookup order. The dispatcher routes on these too.
pub fn topic_names() -> impl Iterator<Item = &'static str> {
    [MATH_TOPICS, SCIENCE_TOPICS, HISTORY_TOPICS]
        .into_iter()
        .flatten()
        .map(|(topic, _)| *topic)
}

#[derive(Debug, Default)]
pub struct StudyResponder;

impl StudyResponder {
    pub fn new() -> Self {
        Self
    }

    fn reply(query: &str) -> String {
        let query = normalize(query);

        let known = [MATH_TOPICS, SCIENCE_TOPICS, HISTORY_TOPICS]
            .into_iter()
            .flatten()
            .find(|(topic, _)| query.contains(topic));
        if let Some((topic, explanation)) = known {
            return format!("Here's what I know about {}: {}", topic, explanation);
        }

        if query.contains("solve") && contains_any(&query, ARITHMETIC_MARKERS) {
            return SOLVE_REPLY.to_string();
        }

        GENERIC_REPLY.to_string()
    }
}

#[async_trait::async_trait]
impl Responder for StudyResponder {
    fn id(&self) -> ResponderId {
        ResponderId::Study
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        Ok(Self::reply(utterance))
    }
}
