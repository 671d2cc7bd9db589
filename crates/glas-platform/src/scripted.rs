//! A speech engine with no capture hardware behind it.
//!
//! [`ScriptedEngine`] accepts the control calls and records them; the
//! caller plays the platform's part by feeding results, errors and end
//! notifications into the controller directly. Used by tests and by the
//! CLI's event replay.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::engine::{EngineError, EngineSettings, PlatformSpeechEngine};

/// Shared counters of the control calls an engine received.
#[derive(Debug, Default)]
pub struct EngineCalls {
    begins: AtomicUsize,
    stops: AtomicUsize,
    aborts: AtomicUsize,
}

impl EngineCalls {
    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn aborts(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }
}

/// Capture-free [`PlatformSpeechEngine`].
pub struct ScriptedEngine {
    settings: EngineSettings,
    calls: Arc<EngineCalls>,
    begin_failure: Option<EngineError>,
}

impl ScriptedEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            calls: Arc::new(EngineCalls::default()),
            begin_failure: None,
        }
    }

    /// Make every `begin()` fail with the given platform code.
    pub fn failing_with(mut self, code: &str) -> Self {
        self.begin_failure = Some(EngineError::new(code, "scripted begin failure"));
        self
    }

    /// Handle to the call counters; stays valid after the engine is boxed.
    pub fn calls(&self) -> Arc<EngineCalls> {
        Arc::clone(&self.calls)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

impl PlatformSpeechEngine for ScriptedEngine {
    fn locale(&self) -> &str {
        &self.settings.locale
    }

    fn begin(&mut self) -> Result<(), EngineError> {
        self.calls.begins.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.begin_failure {
            debug!(code = %err.code, "scripted engine refusing to begin");
            return Err(err.clone());
        }
        debug!(locale = %self.settings.locale, "scripted engine began capture");
        Ok(())
    }

    fn request_stop(&mut self) {
        self.calls.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn abort(&mut self) {
        self.calls.aborts.fetch_add(1, Ordering::SeqCst);
    }
}
