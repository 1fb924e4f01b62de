//! Language learning: basic Spanish, French and German vocabulary plus study tips.

use super::{Responder, ResponderId};
use crate::domain::DomainError;
use crate::ports::{RandomSource, pick};
use crate::shared::text::{contains_any, normalize};
use std::sync::Arc;

type Pairs = &'static [(&'static str, &'static str)];

/// Vocabulary for one language. Pairs are (english, foreign) in teaching order.
pub struct Vocabulary {
    pub language: &'static str,
    pub greetings: Pairs,
    pub numbers: Pairs,
    pub colors: Pairs,
}

pub const VOCABULARIES: &[Vocabulary] = &[
    Vocabulary {
        language: "spanish",
        greetings: &[("hello", "hola"), ("goodbye", "adiós"), ("thank you", "gracias")],
        numbers: &[("one", "uno"), ("two", "dos"), ("three", "tres")],
        colors: &[("red", "rojo"), ("blue", "azul"), ("green", "verde")],
    },
    Vocabulary {
        language: "french",
        greetings: &[("hello", "bonjour"), ("goodbye", "au revoir"), ("thank you", "merci")],
        numbers: &[("one", "un"), ("two", "deux"), ("three", "trois")],
        colors: &[("red", "rouge"), ("blue", "bleu"), ("green", "vert")],
    },
    Vocabulary {
        language: "german",
        greetings: &[("hello", "hallo"), ("goodbye", "auf wiedersehen"), ("thank you", "danke")],
        numbers: &[("one", "eins"), ("two", "zwei"), ("three", "drei")],
        colors: &[("red", "rot"), ("blue", "blau"), ("green", "grün")],
    },
];

pub const LEARNING_TIPS: &[&str] = &[
    "Practice speaking out loud, even if you're alone.",
    "Try to think in the language you're learning.",
    "Watch movies or TV shows with subtitles in your target language.",
    "Use flashcards for vocabulary building.",
    "Practice a little bit every day rather than long sessions occasionally.",
];

pub const TIP_PREFIX: &str = "Here's a language learning tip: ";

const TRANSLATE_REPLY: &str = "I can help with basic translations for Spanish, French, and German. What would you like to translate?";
const PRACTICE_REPLY: &str = "Let's practice! I can help you with greetings, numbers, and colors in Spanish, French, or German. Which language interests you?";
const GENERIC_REPLY: &str = "I can help you learn Spanish, French, or German. I can teach greetings, numbers, colors, provide translations, and give learning tips. What would you like to learn?";

/// Language names the responder teaches. The dispatcher routes on these too.
pub fn language_names() -> impl Iterator<Item = &'static str> {
    VOCABULARIES.iter().map(|v| v.language)
}

fn word_list(language: &str, category: &str, pairs: Pairs) -> String {
    let items: Vec<String> = pairs
        .iter()
        .map(|(english, foreign)| format!("{} is {}", english, foreign))
        .collect();
    format!("Here are some {} {}: {}", language, category, items.join(", "))
}

pub struct LanguageResponder {
    rng: Arc<dyn RandomSource>,
}

impl LanguageResponder {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }
}

#[async_trait::async_trait]
impl Responder for LanguageResponder {
    fn id(&self) -> ResponderId {
        ResponderId::Language
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        let request = normalize(utterance);

        // A named language without a category falls through to the generic checks below.
        for vocab in VOCABULARIES.iter().filter(|v| request.contains(v.language)) {
            if request.contains("greeting") {
                return Ok(word_list(vocab.language, "greetings", vocab.greetings));
            }
            if request.contains("number") {
                return Ok(word_list(vocab.language, "numbers", vocab.numbers));
            }
            if request.contains("color") {
                return Ok(word_list(vocab.language, "colors", vocab.colors));
            }
        }

        if request.contains("translate") {
            return Ok(TRANSLATE_REPLY.to_string());
        }
        if request.contains("practice") {
            return Ok(PRACTICE_REPLY.to_string());
        }
        if contains_any(&request, &["tip", "advice"]) {
            return Ok(format!(
                "{}{}",
                TIP_PREFIX,
                pick(self.rng.as_ref(), LEARNING_TIPS)
            ));
        }
        Ok(GENERIC_REPLY.to_string())
    }
}
