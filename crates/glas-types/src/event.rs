//! Notifications delivered by a platform speech engine.

use serde::{Deserialize, Serialize};

use crate::session::RecognitionChunk;

/// One notification from the platform engine, in delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecognitionEvent {
    /// One or more results, each tagged final or interim.
    Result { chunks: Vec<RecognitionChunk> },
    /// The capture failed; `code` is drawn from the engine's error vocabulary.
    Error {
        code: String,
        #[serde(default)]
        message: Option<String>,
    },
    /// The capture session ended.
    End,
}
