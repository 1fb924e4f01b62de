//! Session loop: greet, then capture, dispatch and render until a stop phrase.
//!
//! Orchestrates CapturePort, Dispatcher and PlaybackPort. `SessionService` never closes the
//! store; `run_until_stopped` does, on every exit path.

use crate::domain::{CaptureOutcome, DomainError};
use crate::ports::{CapturePort, PlaybackPort, RecordStore, SessionPort};
use crate::usecases::dispatcher::{Dispatcher, Reply};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const GREETING: &str = "Hello! I'm your personal AI assistant. I can help you with studies, wellness, productivity, support, finance, meals, tech issues, and language learning. How can I assist you today?";

pub const FAREWELL: &str = "Goodbye! Have a great day!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Listening,
    Stopped,
}

pub struct SessionService {
    capture: Arc<dyn CapturePort>,
    playback: Arc<dyn PlaybackPort>,
    dispatcher: Arc<Dispatcher>,
    capture_timeout: Duration,
}

impl SessionService {
    pub fn new(
        capture: Arc<dyn CapturePort>,
        playback: Arc<dyn PlaybackPort>,
        dispatcher: Arc<Dispatcher>,
        capture_timeout: Duration,
    ) -> Self {
        Self {
            capture,
            playback,
            dispatcher,
            capture_timeout,
        }
    }

    /// Render a reply. Playback failures are logged and the session carries on.
    async fn speak(&self, text: &str) {
        if let Err(e) = self.playback.render(text).await {
            warn!(error = %e, "playback failed");
        }
    }

    /// One capture cycle from Listening. Returns the state the session moves to.
    pub async fn step(&self) -> Result<SessionState, DomainError> {
        let outcome = match self.capture.capture(self.capture_timeout).await {
            Ok(outcome) => outcome,
            Err(DomainError::InputClosed) => {
                info!("input closed; ending session");
                return Ok(SessionState::Stopped);
            }
            Err(e) => return Err(e),
        };

        match outcome {
            CaptureOutcome::Failure(failure) => {
                debug!(?failure, "capture produced no utterance");
                if let Some(apology) = failure.apology() {
                    self.speak(apology).await;
                }
                Ok(SessionState::Listening)
            }
            CaptureOutcome::Utterance(utterance) => match self.dispatcher.dispatch(&utterance).await? {
                Reply::Speak(text) => {
                    self.speak(&text).await;
                    Ok(SessionState::Listening)
                }
                Reply::Stop => {
                    self.speak(FAREWELL).await;
                    Ok(SessionState::Stopped)
                }
            },
        }
    }
}

#[async_trait::async_trait]
impl SessionPort for SessionService {
    async fn run(&self) -> Result<(), DomainError> {
        info!(timeout_secs = self.capture_timeout.as_secs(), "session started");
        self.speak(GREETING).await;

        let mut turns = 0u64;
        while self.step().await? == SessionState::Listening {
            turns += 1;
        }
        info!(turns, "session stopped");
        Ok(())
    }
}

/// How a supervised session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionExit {
    /// Stop phrase or end of input.
    Finished,
    /// The session returned an error or panicked. Holds the message to report.
    Failed(String),
    /// `shutdown` resolved first (Ctrl-C in the binary).
    Interrupted,
}

/// Run `session` in its own task until it ends or `shutdown` resolves, then close `store`.
///
/// A panic inside the session surfaces as a `JoinError` and is reported as `Failed`.
pub async fn run_until_stopped<F>(
    session: Arc<dyn SessionPort>,
    store: Arc<dyn RecordStore>,
    shutdown: F,
) -> SessionExit
where
    F: Future<Output = ()>,
{
    let mut task = tokio::spawn(async move { session.run().await });
    let exit = tokio::select! {
        joined = &mut task => match joined {
            Ok(Ok(())) => SessionExit::Finished,
            Ok(Err(e)) => {
                error!(error = %e, "session failed");
                SessionExit::Failed(e.to_string())
            }
            Err(e) => {
                error!(error = %e, "session task panicked");
                SessionExit::Failed(e.to_string())
            }
        },
        _ = shutdown => {
            task.abort();
            SessionExit::Interrupted
        }
    };

    store.close().await;
    exit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;
    use crate::adapters::random::FixedRandom;
    use crate::domain::RecognitionFailure;
    use crate::usecases::context::AssistantContext;
    use crate::ports::TaskStore;
    use crate::usecases::dispatcher::FALLBACK_REPLY;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Hands out scripted outcomes, then reports the input as closed.
    struct ScriptedCapture {
        script: Mutex<VecDeque<CaptureOutcome>>,
    }

    impl ScriptedCapture {
        fn new(outcomes: Vec<CaptureOutcome>) -> Self {
            Self {
                script: Mutex::new(outcomes.into()),
            }
        }

        fn remaining(&self) -> usize {
            self.script.lock().len()
        }
    }

    #[async_trait::async_trait]
    impl CapturePort for ScriptedCapture {
        async fn capture(&self, _timeout: Duration) -> Result<CaptureOutcome, DomainError> {
            self.script.lock().pop_front().ok_or(DomainError::InputClosed)
        }
    }

    #[derive(Default)]
    struct RecordingPlayback {
        rendered: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingPlayback {
        fn rendered(&self) -> Vec<String> {
            self.rendered.lock().clone()
        }
    }

    #[async_trait::async_trait]
    impl PlaybackPort for RecordingPlayback {
        async fn render(&self, text: &str) -> Result<(), DomainError> {
            self.rendered.lock().push(text.to_string());
            if self.fail {
                return Err(DomainError::Playback("speaker unplugged".into()));
            }
            Ok(())
        }
    }

    fn said(text: &str) -> CaptureOutcome {
        CaptureOutcome::Utterance(text.to_string())
    }

    fn session(
        outcomes: Vec<CaptureOutcome>,
        playback: RecordingPlayback,
    ) -> (SessionService, Arc<ScriptedCapture>, Arc<RecordingPlayback>) {
        let store = Arc::new(MemoryStore::new());
        let ctx = AssistantContext::new(store, Arc::new(FixedRandom(0)));
        let capture = Arc::new(ScriptedCapture::new(outcomes));
        let playback = Arc::new(playback);
        let service = SessionService::new(
            capture.clone(),
            playback.clone(),
            Arc::new(Dispatcher::new(&ctx)),
            Duration::from_secs(5),
        );
        (service, capture, playback)
    }

    #[tokio::test]
    async fn greets_answers_and_says_goodbye() {
        let (service, capture, playback) = session(
            vec![said("what's the weather"), said("stop"), said("never read")],
            RecordingPlayback::default(),
        );
        service.run().await.unwrap();

        assert_eq!(
            playback.rendered(),
            vec![GREETING.to_string(), FALLBACK_REPLY.to_string(), FAREWELL.to_string()]
        );
        assert_eq!(capture.remaining(), 1);
    }

    #[tokio::test]
    async fn timeout_is_silent_and_keeps_listening() {
        let (service, _capture, playback) = session(
            vec![CaptureOutcome::Failure(RecognitionFailure::Timeout)],
            RecordingPlayback::default(),
        );
        assert_eq!(service.step().await.unwrap(), SessionState::Listening);
        assert!(playback.rendered().is_empty());
    }

    #[tokio::test]
    async fn recognition_failures_are_apologized_for() {
        let (service, _capture, playback) = session(
            vec![
                CaptureOutcome::Failure(RecognitionFailure::Unintelligible),
                CaptureOutcome::Failure(RecognitionFailure::ServiceError),
            ],
            RecordingPlayback::default(),
        );
        assert_eq!(service.step().await.unwrap(), SessionState::Listening);
        assert_eq!(service.step().await.unwrap(), SessionState::Listening);
        assert_eq!(
            playback.rendered(),
            vec![
                "Sorry, I didn't understand that.".to_string(),
                "Sorry, there was an error with the speech recognition service.".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn closed_input_stops_without_farewell() {
        let (service, _capture, playback) = session(vec![], RecordingPlayback::default());
        service.run().await.unwrap();
        assert_eq!(playback.rendered(), vec![GREETING.to_string()]);
    }

    #[tokio::test]
    async fn playback_failure_does_not_end_the_session() {
        let playback = RecordingPlayback {
            fail: true,
            ..Default::default()
        };
        let (service, _capture, playback) = session(vec![said("help"), said("quit")], playback);
        service.run().await.unwrap();
        assert_eq!(playback.rendered().len(), 3);
        assert_eq!(playback.rendered().last().map(String::as_str), Some(FAREWELL));
    }

    #[tokio::test]
    async fn records_persist_across_turns() {
        let (service, _capture, playback) = session(
            vec![
                said("add expense 12.5 for a movie"),
                said("add expense 7.25 on shopping"),
                said("show expenses"),
                said("exit"),
            ],
            RecordingPlayback::default(),
        );
        service.run().await.unwrap();
        let rendered = playback.rendered();
        assert_eq!(rendered[3], "Your total recorded expenses are $19.75.");
    }

    /// Session stand-in that ends in a chosen way.
    enum Scripted {
        Finish,
        Fail,
        Panic,
        Hang,
    }

    #[async_trait::async_trait]
    impl SessionPort for Scripted {
        async fn run(&self) -> Result<(), DomainError> {
            match self {
                Scripted::Finish => Ok(()),
                Scripted::Fail => Err(DomainError::Store("disk full".into())),
                Scripted::Panic => panic!("responder bug"),
                Scripted::Hang => std::future::pending().await,
            }
        }
    }

    async fn supervise(
        session: Scripted,
        shutdown: impl Future<Output = ()>,
    ) -> (SessionExit, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let exit = run_until_stopped(Arc::new(session), store.clone(), shutdown).await;
        (exit, store)
    }

    async fn assert_released(store: &MemoryStore) {
        assert!(matches!(
            store.list_tasks().await,
            Err(DomainError::Store(_))
        ));
    }

    #[tokio::test]
    async fn store_released_after_normal_stop() {
        let (exit, store) = supervise(Scripted::Finish, std::future::pending()).await;
        assert_eq!(exit, SessionExit::Finished);
        assert_released(&store).await;
    }

    #[tokio::test]
    async fn store_released_after_session_error() {
        let (exit, store) = supervise(Scripted::Fail, std::future::pending()).await;
        assert_eq!(exit, SessionExit::Failed("Store error: disk full".into()));
        assert_released(&store).await;
    }

    #[tokio::test]
    async fn store_released_after_panic() {
        let (exit, store) = supervise(Scripted::Panic, std::future::pending()).await;
        assert!(matches!(exit, SessionExit::Failed(_)), "{exit:?}");
        assert_released(&store).await;
    }

    #[tokio::test]
    async fn store_released_after_shutdown() {
        let (exit, store) = supervise(Scripted::Hang, std::future::ready(())).await;
        assert_eq!(exit, SessionExit::Interrupted);
        assert_released(&store).await;
    }

    #[tokio::test]
    async fn full_session_releases_store_on_stop_phrase() {
        let store = Arc::new(MemoryStore::new());
        let ctx = AssistantContext::new(store.clone(), Arc::new(FixedRandom(0)));
        let session = SessionService::new(
            Arc::new(ScriptedCapture::new(vec![said("add task water plants"), said("quit")])),
            Arc::new(RecordingPlayback::default()),
            Arc::new(Dispatcher::new(&ctx)),
            Duration::from_secs(5),
        );
        let exit =
            run_until_stopped(Arc::new(session), store.clone(), std::future::pending()).await;
        assert_eq!(exit, SessionExit::Finished);
        assert_released(&store).await;
    }
}
