//! Speech session controller.
//!
//! [`SpeechSessionController`] is the finite-state machine that sits
//! between a [`PlatformSpeechEngine`] and the rest of the application.
//! The host calls the imperative controls (`start`, `stop`, `abort`,
//! `reset`) and forwards the engine's notifications (`on_chunk`,
//! `on_error`, `on_end`, or `handle_event` for a serialized stream).
//! Every call runs to completion before the next one; there is no
//! internal locking and no background task.
//!
//! | State | `start` | `stop` | `abort` | chunk | `on_error` | `on_end` |
//! |-------|---------|--------|---------|-------|------------|----------|
//! | Idle | Listening | - | - | dropped | Errored | - |
//! | Listening | - | stop pending | Stopping | processed | Errored | Idle |
//! | Stopping | - | - | - | dropped | Errored | Idle |
//! | Errored | Listening | - | - | dropped | Errored | - |

use std::sync::Arc;

use glas_platform::PlatformSpeechEngine;
use glas_types::{
    ErrorKind, RecognitionChunk, RecognitionEvent, ResolvedCommand, SessionSnapshot, SessionState,
    clamp_confidence,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dispatch::CommandDispatcher;
use crate::grammar::CommandGrammar;
use crate::transcript::TranscriptAccumulator;

/// Owns one engine, one transcript buffer and the session state.
pub struct SpeechSessionController {
    engine: Option<Box<dyn PlatformSpeechEngine>>,
    grammar: Arc<CommandGrammar>,
    dispatcher: Option<Box<dyn CommandDispatcher>>,
    transcript: TranscriptAccumulator,
    state: SessionState,
    error: Option<ErrorKind>,
    error_message: Option<String>,
    stop_pending: bool,
    min_confidence: f32,
    session_id: Option<Uuid>,
}

impl SpeechSessionController {
    /// Create a controller. `engine` is `None` when the host has no
    /// speech capture; every control is then a no-op.
    pub fn new(engine: Option<Box<dyn PlatformSpeechEngine>>, grammar: Arc<CommandGrammar>) -> Self {
        if engine.is_none() {
            info!("speech capture unavailable; voice controls disabled");
        }
        Self {
            engine,
            grammar,
            dispatcher: None,
            transcript: TranscriptAccumulator::new(),
            state: SessionState::Idle,
            error: None,
            error_message: None,
            stop_pending: false,
            min_confidence: 0.0,
            session_id: None,
        }
    }

    /// Register the receiver of resolved commands.
    pub fn with_dispatcher(mut self, dispatcher: impl CommandDispatcher + 'static) -> Self {
        self.dispatcher = Some(Box::new(dispatcher));
        self
    }

    /// Final chunks below this confidence are transcribed but not matched.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    // ── controls ─────────────────────────────────────────────────────

    /// Begin a capture session.
    ///
    /// Accepted from Idle and Errored. While a session is live this does
    /// nothing, so the engine never sees two `begin()` calls for one
    /// session. A synchronous begin failure lands in Errored.
    #[doc(alias = "start_listening")]
    #[doc(alias = "startListening")]
    pub fn start(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            debug!("start ignored: no speech engine");
            return;
        };
        if self.state.is_live() {
            debug!(state = %self.state, "start ignored: session already live");
            return;
        }

        if engine.locale() != self.grammar.locale() {
            let engine_locale = engine.locale().to_string();
            warn!(
                engine_locale = %engine_locale,
                grammar_locale = %self.grammar.locale(),
                "engine locale does not match grammar"
            );
            self.enter_errored(
                ErrorKind::LocaleUnsupported,
                Some(format!("engine is configured for {engine_locale}")),
            );
            return;
        }

        self.error = None;
        self.error_message = None;

        match engine.begin() {
            Ok(()) => {
                let id = Uuid::new_v4();
                self.session_id = Some(id);
                self.stop_pending = false;
                self.state = SessionState::Listening;
                info!(session = %id, "listening");
            }
            Err(err) => {
                warn!(code = %err.code, error = %err, "speech engine failed to begin");
                self.enter_errored(ErrorKind::from_platform_code(&err.code), Some(err.message));
            }
        }
    }

    /// Ask the engine to finish. The state stays Listening until the
    /// engine reports the end of the session.
    #[doc(alias = "stop_listening")]
    #[doc(alias = "stopListening")]
    pub fn stop(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if self.state != SessionState::Listening {
            debug!(state = %self.state, "stop ignored: not listening");
            return;
        }
        if self.stop_pending {
            debug!("stop already requested");
            return;
        }
        engine.request_stop();
        self.stop_pending = true;
        debug!(session = ?self.session_id, "stop requested");
    }

    /// Stop immediately. Results still in flight are discarded.
    pub fn abort(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if self.state != SessionState::Listening {
            debug!(state = %self.state, "abort ignored: not listening");
            return;
        }
        engine.abort();
        self.state = SessionState::Stopping;
        debug!(session = ?self.session_id, "session aborted");
    }

    /// Clear the transcript, confidence and error. The state is untouched.
    #[doc(alias = "reset_transcript")]
    #[doc(alias = "resetTranscript")]
    pub fn reset(&mut self) {
        self.transcript.reset();
        self.error = None;
        self.error_message = None;
    }

    // ── engine notifications ─────────────────────────────────────────

    /// Process one recognition chunk.
    ///
    /// Only honored while Listening. A final chunk is appended to the
    /// transcript and then matched against the grammar; a match goes to
    /// the dispatcher before this call returns. An interim chunk replaces
    /// the interim transcript.
    pub fn on_chunk(&mut self, chunk: &RecognitionChunk) {
        if self.state != SessionState::Listening {
            debug!(state = %self.state, "chunk dropped: not listening");
            return;
        }

        if !chunk.is_final {
            self.transcript.replace_interim(&chunk.text);
            return;
        }

        let confidence = clamp_confidence(chunk.confidence);
        self.transcript.append_final(&chunk.text, confidence);

        if confidence < self.min_confidence {
            debug!(
                confidence,
                min_confidence = self.min_confidence,
                "final chunk below confidence threshold; not matched"
            );
            return;
        }

        if let Some(command) = self.grammar.match_command(&chunk.text) {
            self.dispatch(command);
        }
    }

    /// Process every chunk of one result notification, in order.
    pub fn on_result(&mut self, chunks: &[RecognitionChunk]) {
        for chunk in chunks {
            self.on_chunk(chunk);
        }
    }

    /// Record a recognition failure and enter Errored. Never retried.
    pub fn on_error(&mut self, code: &str) {
        self.on_error_with_message(code, None);
    }

    pub fn on_error_with_message(&mut self, code: &str, message: Option<&str>) {
        let kind = ErrorKind::from_platform_code(code);
        warn!(
            session = ?self.session_id,
            code,
            kind = %kind,
            "recognition error"
        );
        self.enter_errored(kind, message.map(str::to_string));
    }

    /// The engine finished the session.
    pub fn on_end(&mut self) {
        match self.state {
            SessionState::Listening | SessionState::Stopping => {
                info!(session = ?self.session_id, "session ended");
                self.state = SessionState::Idle;
            }
            SessionState::Idle | SessionState::Errored => {
                debug!(state = %self.state, "end notification outside a live session");
            }
        }
        self.transcript.clear_interim();
        self.stop_pending = false;
        self.session_id = None;
    }

    /// Route a serialized engine notification.
    pub fn handle_event(&mut self, event: &RecognitionEvent) {
        match event {
            RecognitionEvent::Result { chunks } => self.on_result(chunks),
            RecognitionEvent::Error { code, message } => {
                self.on_error_with_message(code, message.as_deref())
            }
            RecognitionEvent::End => self.on_end(),
        }
    }

    // ── observation ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            is_listening: self.state.is_live(),
            is_supported: self.is_supported(),
            transcript: self.transcript.final_text().to_string(),
            interim_transcript: self.transcript.interim_text().to_string(),
            error: self.error.clone(),
            error_message: self.error_message.clone(),
            confidence: self.transcript.confidence(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_supported(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether `stop()` was called and the engine has not ended yet.
    pub fn is_stop_pending(&self) -> bool {
        self.stop_pending
    }

    pub fn transcript(&self) -> &str {
        self.transcript.final_text()
    }

    pub fn interim_transcript(&self) -> &str {
        self.transcript.interim_text()
    }

    pub fn error(&self) -> Option<&ErrorKind> {
        self.error.as_ref()
    }

    /// Engine-supplied detail for the current error, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn confidence(&self) -> f32 {
        self.transcript.confidence()
    }

    /// Id of the live session, if any.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn grammar(&self) -> &CommandGrammar {
        &self.grammar
    }

    // ── internals ────────────────────────────────────────────────────

    fn enter_errored(&mut self, kind: ErrorKind, message: Option<String>) {
        self.state = SessionState::Errored;
        self.error = Some(kind);
        self.error_message = message;
        self.stop_pending = false;
        self.session_id = None;
        self.transcript.clear_interim();
    }

    fn dispatch(&mut self, command: ResolvedCommand) {
        let Some(dispatcher) = self.dispatcher.as_mut() else {
            debug!(pattern = %command.pattern_id(), "no dispatcher registered; command dropped");
            return;
        };
        let pattern = command.pattern_id().to_string();
        if let Err(e) = dispatcher.dispatch(command) {
            warn!(pattern = %pattern, error = %e, "dispatcher failed");
        }
    }
}

impl Drop for SpeechSessionController {
    fn drop(&mut self) {
        if self.state.is_live()
            && let Some(engine) = self.engine.as_mut()
        {
            debug!(session = ?self.session_id, "controller dropped mid-session; aborting engine");
            engine.abort();
        }
    }
}

impl std::fmt::Debug for SpeechSessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSessionController")
            .field("state", &self.state)
            .field("supported", &self.engine.is_some())
            .field("session_id", &self.session_id)
            .field("error", &self.error)
            .field("stop_pending", &self.stop_pending)
            .finish_non_exhaustive()
    }
}
