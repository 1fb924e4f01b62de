//! DIY tech troubleshooting: canned fixes for wifi, slow computers, phones and printers.

use super::{Responder, ResponderId};
use crate::domain::DomainError;
use crate::ports::{RandomSource, pick};
use crate::shared::text::{contains_any, normalize};
use std::sync::Arc;

pub const WIFI: &[&str] = &[
    "Try restarting your router by unplugging it for 30 seconds, then plugging it back in.",
    "Check if other devices can connect to the same network.",
    "Move closer to the router to improve signal strength.",
    "Forget and reconnect to the WiFi network in your device settings.",
];

pub const COMPUTER_SLOW: &[&str] = &[
    "Restart your computer to clear temporary files and refresh memory.",
    "Check for running programs in Task Manager and close unnecessary ones.",
    "Run a disk cleanup to free up storage space.",
    "Check for malware using your antivirus software.",
];

pub const PHONE: &[&str] = &[
    "Try restarting your phone by holding the power button.",
    "Check if you have enough storage space available.",
    "Update your apps and operating system.",
    "Clear the cache for problematic apps.",
];

pub const PRINTER: &[&str] = &[
    "Check that the printer is connected and powered on.",
    "Ensure there's paper in the tray and ink in the cartridges.",
    "Try printing a test page from the printer's menu.",
    "Restart both your computer and printer.",
];

/// Problem keyword to its solutions, in lookup order.
const SOLUTIONS: &[(&str, &[&str])] = &[
    ("wifi", WIFI),
    ("computer slow", COMPUTER_SLOW),
    ("phone", PHONE),
    ("printer", PRINTER),
];

const GENERIC_REPLY: &str = "I can help troubleshoot WiFi, slow computers, phone issues, printer problems, and internet connectivity. What specific tech issue are you experiencing?";

pub struct TechResponder {
    rng: Arc<dyn RandomSource>,
}

impl TechResponder {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }
}

#[async_trait::async_trait]
impl Responder for TechResponder {
    fn id(&self) -> ResponderId {
        ResponderId::Tech
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        let issue = normalize(utterance);
        let rng = self.rng.as_ref();

        if let Some(&(problem, solutions)) = SOLUTIONS.iter().find(|(p, _)| issue.contains(p)) {
            return Ok(format!(
                "Here's how to fix your {} issue: {}",
                problem,
                pick(rng, solutions)
            ));
        }
        if contains_any(&issue, &["internet", "connection"]) {
            return Ok(pick(rng, WIFI).to_string());
        }
        if issue.contains("slow") || contains_any(&issue, &["laptop", "computer", "pc"]) {
            return Ok(pick(rng, COMPUTER_SLOW).to_string());
        }
        Ok(GENERIC_REPLY.to_string())
    }
}
