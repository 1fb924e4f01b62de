//! Customer support FAQ.

use super::{Responder, ResponderId};
use crate::domain::DomainError;
use crate::shared::text::normalize;

const FAQ: &[(&str, &str)] = &[
    (
        "account",
        "For account issues, please check your login credentials and ensure your internet connection is stable.",
    ),
    (
        "password",
        "To reset your password, go to the login page and click \"Forgot Password\". Follow the instructions sent to your email.",
    ),
    (
        "billing",
        "For billing questions, please check your account dashboard or contact our billing department.",
    ),
    (
        "technical",
        "For technical issues, try restarting the application or clearing your browser cache.",
    ),
    (
        "refund",
        "Refund requests can be processed within 30 days of purchase. Please provide your order number.",
    ),
];

const HELP_REPLY: &str = "I can help with account issues, password resets, billing questions, technical problems, and refund requests. What specific issue are you experiencing?";

const GENERIC_REPLY: &str = "I understand you need support. Can you please describe your specific issue? I can help with accounts, passwords, billing, technical issues, or refunds.";

#[derive(Debug, Default)]
pub struct SupportResponder;

impl SupportResponder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Responder for SupportResponder {
    fn id(&self) -> ResponderId {
        ResponderId::Support
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        let query = normalize(utterance);

        if let Some((_, answer)) = FAQ.iter().find(|(keyword, _)| query.contains(keyword)) {
            return Ok(answer.to_string());
        }
        if query.contains("help") {
            return Ok(HELP_REPLY.to_string());
        }
        Ok(GENERIC_REPLY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn faq_entries_in_table_order() {
        let responder = SupportResponder::new();
        // "account" precedes "password" in the table.
        assert_eq!(
            responder
                .handle("help with my account password")
                .await
                .unwrap(),
            FAQ[0].1
        );
        assert!(
            responder
                .handle("I want a REFUND")
                .await
                .unwrap()
                .starts_with("Refund requests")
        );
    }

    #[tokio::test]
    async fn help_then_generic() {
        let responder = SupportResponder::new();
        assert_eq!(responder.handle("help me").await.unwrap(), HELP_REPLY);
        assert_eq!(responder.handle("i have a problem").await.unwrap(), GENERIC_REPLY);
    }
}
