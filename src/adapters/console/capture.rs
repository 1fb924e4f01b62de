//! Implements CapturePort over a line reader (stdin in production).
//!
//! A typed line plays the role of a recognized utterance; a blank line is unintelligible.

use crate::domain::{CaptureOutcome, DomainError, RecognitionFailure};
use crate::ports::CapturePort;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct ConsoleCapture<R> {
    lines: Mutex<Lines<R>>,
    echo: bool,
    prompted: AtomicBool,
}

impl ConsoleCapture<BufReader<Stdin>> {
    /// Reads from the process stdin and echoes prompts like a voice session would.
    pub fn stdin() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            echo: true,
            prompted: AtomicBool::new(false),
        }
    }
}

impl<R: AsyncBufRead + Unpin + Send> ConsoleCapture<R> {
    /// Reads from any buffered source without printing prompts.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
            echo: false,
            prompted: AtomicBool::new(false),
        }
    }

    fn prompt(&self) {
        // One "Listening..." per utterance, not per timeout.
        if self.echo && !self.prompted.swap(true, Ordering::Relaxed) {
            let mut out = std::io::stdout();
            let _ = writeln!(out, "Listening...");
            let _ = out.flush();
        }
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> CapturePort for ConsoleCapture<R> {
    async fn capture(&self, timeout: Duration) -> Result<CaptureOutcome, DomainError> {
        self.prompt();
        let mut lines = self.lines.lock().await;
        let line = match tokio::time::timeout(timeout, lines.next_line()).await {
            Err(_) => return Ok(CaptureOutcome::Failure(RecognitionFailure::Timeout)),
            Ok(Err(e)) => {
                warn!(error = %e, "input read failed");
                return Ok(CaptureOutcome::Failure(RecognitionFailure::ServiceError));
            }
            Ok(Ok(None)) => return Err(DomainError::InputClosed),
            Ok(Ok(Some(line))) => line,
        };
        self.prompted.store(false, Ordering::Relaxed);

        let text = line.trim();
        if text.is_empty() {
            return Ok(CaptureOutcome::Failure(RecognitionFailure::Unintelligible));
        }
        let command = text.to_lowercase();
        if self.echo {
            println!("You said: {}", command);
        }
        debug!(utterance = %command, "captured");
        Ok(CaptureOutcome::Utterance(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(200);

    #[tokio::test]
    async fn lines_become_lowercase_utterances() {
        let capture = ConsoleCapture::from_reader(&b"What is Algebra\n   \n"[..]);
        assert_eq!(
            capture.capture(WAIT).await.unwrap(),
            CaptureOutcome::Utterance("what is algebra".into())
        );
        assert_eq!(
            capture.capture(WAIT).await.unwrap(),
            CaptureOutcome::Failure(RecognitionFailure::Unintelligible)
        );
        assert!(matches!(
            capture.capture(WAIT).await,
            Err(DomainError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn silent_source_times_out() {
        let (_writer, reader) = tokio::io::duplex(64);
        let capture = ConsoleCapture::from_reader(BufReader::new(reader));
        assert_eq!(
            capture.capture(Duration::from_millis(20)).await.unwrap(),
            CaptureOutcome::Failure(RecognitionFailure::Timeout)
        );
    }
}
