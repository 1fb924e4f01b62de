//! Implements PlaybackPort. Prints each reply and, when configured, speaks it with an external TTS program.

use crate::domain::DomainError;
use crate::ports::PlaybackPort;
use std::io::Write;
use tokio::process::Command;
use tracing::debug;

pub struct ConsolePlayback {
    /// TTS program invoked as `<program> <text>` (e.g. `espeak`, `say`). `None` prints only.
    speech_command: Option<String>,
}

impl ConsolePlayback {
    pub fn new(speech_command: Option<String>) -> Self {
        Self {
            speech_command: speech_command.filter(|c| !c.trim().is_empty()),
        }
    }

    async fn speak(&self, program: &str, text: &str) -> Result<(), DomainError> {
        let output = Command::new(program)
            .arg(text)
            .output()
            .await
            .map_err(|e| DomainError::Playback(format!("{}: {}", program, e)))?;
        if !output.status.success() {
            return Err(DomainError::Playback(format!(
                "{} exited with {}",
                program, output.status
            )));
        }
        debug!(program, chars = text.len(), "reply spoken");
        Ok(())
    }
}

#[async_trait::async_trait]
impl PlaybackPort for ConsolePlayback {
    async fn render(&self, text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let mut out = std::io::stdout();
        writeln!(out, "Assistant: {}", text).map_err(|e| DomainError::Playback(e.to_string()))?;
        out.flush()
            .map_err(|e| DomainError::Playback(e.to_string()))?;

        match &self.speech_command {
            Some(program) => self.speak(program, text).await,
            None => Ok(()),
        }
    }
}
