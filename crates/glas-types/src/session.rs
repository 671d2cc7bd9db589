//! Session state, recognition chunks and the read-only state snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Lifecycle state of a speech session controller.
///
/// ```text
/// Idle      --start()-->   Listening
/// Errored   --start()-->   Listening
/// Listening --stop()-->    Listening   (stop pending until on_end)
/// Listening --abort()-->   Stopping
/// Listening --on_end()-->  Idle
/// Stopping  --on_end()-->  Idle
/// any       --on_error()-> Errored
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No capture in progress.
    #[default]
    Idle,
    /// Capturing; chunks are processed only in this state.
    Listening,
    /// Aborted; waiting for the engine's end notification.
    Stopping,
    /// The last session ended with a recognition error.
    Errored,
}

impl SessionState {
    /// Whether the underlying capture is still live.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Listening | Self::Stopping)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Listening => write!(f, "listening"),
            Self::Stopping => write!(f, "stopping"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// One speech-to-text result produced by the platform engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionChunk {
    /// Transcribed text.
    pub text: String,
    /// Whether this is a committed (final) or provisional (interim) result.
    #[serde(default, alias = "isFinal")]
    pub is_final: bool,
    /// Confidence score (0.0 - 1.0).
    #[serde(default)]
    pub confidence: f32,
}

impl RecognitionChunk {
    /// A committed result.
    pub fn final_text(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            is_final: true,
            confidence: clamp_confidence(confidence),
        }
    }

    /// A provisional, still-revisable result.
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
            confidence: 0.0,
        }
    }
}

/// Clamp a confidence score to `0.0..=1.0`. NaN and infinities become 0.0.
pub fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Read-only view of a controller, as exposed to the rest of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub is_listening: bool,
    pub is_supported: bool,
    pub transcript: String,
    pub interim_transcript: String,
    pub error: Option<ErrorKind>,
    /// Engine-supplied detail for `error`, if any.
    pub error_message: Option<String>,
    pub confidence: f32,
}
