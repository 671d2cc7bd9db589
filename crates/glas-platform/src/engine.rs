//! The injected speech-capture capability.

use glas_types::{SUPPORTED_LOCALE, SpeechConfig};
use thiserror::Error;

/// A platform speech-to-text capture session.
///
/// Implementations wrap whatever the host offers (a browser recognizer,
/// a native dictation service, a streaming model). Results, errors and
/// the end-of-session signal flow back to the controller through its
/// `on_*` methods, strictly serialized, on the host's event loop.
///
/// Each controller owns exactly one engine.
pub trait PlatformSpeechEngine: Send {
    /// Language tag the engine was configured with.
    fn locale(&self) -> &str;

    /// Begin a capture session.
    ///
    /// An `Err` means the session never started; its code is drawn from
    /// the same vocabulary as asynchronous error notifications.
    fn begin(&mut self) -> Result<(), EngineError>;

    /// Ask for a graceful stop. Further results may still arrive before
    /// the end notification.
    fn request_stop(&mut self);

    /// Stop immediately, discarding pending audio.
    fn abort(&mut self);
}

/// Settings an engine is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub locale: String,
    /// Keep emitting results after a final one until stopped.
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            locale: SUPPORTED_LOCALE.to_string(),
            continuous: true,
            interim_results: true,
        }
    }
}

impl From<&SpeechConfig> for EngineSettings {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            locale: config.locale.clone(),
            continuous: config.continuous,
            interim_results: config.interim_results,
        }
    }
}

/// A synchronous failure to begin capture.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("speech engine error `{code}`: {message}")]
pub struct EngineError {
    /// Platform error code (`"not-allowed"`, `"audio-capture"`, ...).
    pub code: String,
    pub message: String,
}

impl EngineError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_use_supported_locale() {
        let settings = EngineSettings::default();
        assert_eq!(settings.locale, "ro-RO");
        assert!(settings.continuous);
        assert!(settings.interim_results);
    }

    #[test]
    fn settings_from_speech_config() {
        let config = SpeechConfig {
            interim_results: false,
            ..SpeechConfig::default()
        };
        let settings = EngineSettings::from(&config);
        assert!(!settings.interim_results);
        assert_eq!(settings.locale, config.locale);
    }

    #[test]
    fn engine_error_display() {
        let err = EngineError::new("not-allowed", "microphone permission refused");
        assert_eq!(
            err.to_string(),
            "speech engine error `not-allowed`: microphone permission refused"
        );
    }
}
