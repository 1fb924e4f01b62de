//! Mental wellness: breathing exercises, guided meditation, affirmations, grounding techniques.

use super::{Responder, ResponderId};
use crate::domain::DomainError;
use crate::ports::{RandomSource, pick};
use crate::shared::text::{contains_any, normalize};
use std::sync::Arc;

pub const BREATHING_EXERCISES: &[&str] = &[
    "Let's do a 4-7-8 breathing exercise. Breathe in for 4 counts, hold for 7, then exhale for 8. Ready? Breathe in... 1, 2, 3, 4. Hold... 1, 2, 3, 4, 5, 6, 7. Exhale... 1, 2, 3, 4, 5, 6, 7, 8.",
    "Try box breathing. Breathe in for 4, hold for 4, exhale for 4, hold for 4. Let's begin: In... 1, 2, 3, 4. Hold... 1, 2, 3, 4. Out... 1, 2, 3, 4. Hold... 1, 2, 3, 4.",
];

pub const MEDITATION_GUIDES: &[&str] = &[
    "Find a comfortable position. Close your eyes and focus on your breath. Notice the air entering and leaving your nostrils. When your mind wanders, gently bring attention back to your breath.",
    "Let's do a body scan meditation. Start by relaxing your toes, then your feet, ankles, calves. Work your way up through your entire body, releasing tension as you go.",
];

pub const AFFIRMATIONS: &[&str] = &[
    "You are capable of handling whatever comes your way today.",
    "You deserve peace, happiness, and success.",
    "Every challenge is an opportunity to grow stronger.",
    "You are worthy of love and respect, especially from yourself.",
];

pub const AFFIRMATION_PREFIX: &str = "Here's a positive affirmation for you: ";

const STRESS_REPLY: &str = "When feeling stressed, try the 5-4-3-2-1 grounding technique: Name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.";

const ANXIETY_REPLY: &str = "For anxiety, try progressive muscle relaxation. Tense and then relax each muscle group, starting with your toes and working up to your head.";

const GENERIC_REPLY: &str = "I can guide you through breathing exercises, meditation, provide affirmations, or help with stress and anxiety techniques. What would you like to try?";

pub struct WellnessResponder {
    rng: Arc<dyn RandomSource>,
}

impl WellnessResponder {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }
}

#[async_trait::async_trait]
impl Responder for WellnessResponder {
    fn id(&self) -> ResponderId {
        ResponderId::Wellness
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        let request = normalize(utterance);
        let rng = self.rng.as_ref();

        let reply = if contains_any(&request, &["breathing", "breathe"]) {
            pick(rng, BREATHING_EXERCISES).to_string()
        } else if contains_any(&request, &["meditation", "meditate"]) {
            pick(rng, MEDITATION_GUIDES).to_string()
        } else if contains_any(&request, &["affirmation", "positive"]) {
            format!("{}{}", AFFIRMATION_PREFIX, pick(rng, AFFIRMATIONS))
        } else if request.contains("stress") {
            STRESS_REPLY.to_string()
        } else if contains_any(&request, &["anxious", "anxiety"]) {
            ANXIETY_REPLY.to_string()
        } else {
            GENERIC_REPLY.to_string()
        };
        Ok(reply)
    }
}
