//! Capture outcomes. What the listening side hands back to the session loop.

/// Recoverable reasons a capture produced no utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionFailure {
    /// Something was heard but could not be understood.
    Unintelligible,
    /// Nothing was heard before the capture timeout.
    Timeout,
    /// The recognition backend failed.
    ServiceError,
}

impl RecognitionFailure {
    /// Reply rendered for this failure, or `None` when the loop should stay silent.
    pub fn apology(self) -> Option<&'static str> {
        match self {
            RecognitionFailure::Unintelligible => Some("Sorry, I didn't understand that."),
            RecognitionFailure::ServiceError => {
                Some("Sorry, there was an error with the speech recognition service.")
            }
            RecognitionFailure::Timeout => None,
        }
    }
}

/// Result of one capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Utterance(String),
    Failure(RecognitionFailure),
}
