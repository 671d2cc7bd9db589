//! Error types for the glas engine.
//!
//! Provides [`GlasError`] for configuration, grammar construction and
//! dispatch failures, and [`ErrorKind`] -- the closed set of recognition
//! failures a speech session can end in. Recognition failures are data,
//! not `Err` values: the session controller stores them in its snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the glas crates.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GlasError {
    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A command template could not be compiled.
    #[error("invalid template `{pattern}`: {reason}")]
    TemplateInvalid {
        /// The offending template text.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A command dispatcher refused or failed to accept a command.
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GlasError>;

/// Recognition failure taxonomy.
///
/// Every platform error code maps to exactly one variant through
/// [`ErrorKind::from_platform_code`]; codes outside the known vocabulary
/// land in [`ErrorKind::Unknown`] with the original code preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "code")]
pub enum ErrorKind {
    /// The engine heard nothing it could transcribe.
    NoSpeechDetected,
    /// No microphone, or it could not be opened.
    MicrophoneUnavailable,
    /// The user or the host refused microphone / service access.
    PermissionDenied,
    /// A network-backed recognizer could not be reached.
    NetworkFailure,
    /// The capture was aborted before producing a result.
    SessionAborted,
    /// The engine does not support the configured locale.
    LocaleUnsupported,
    /// Any code outside the known vocabulary.
    Unknown(String),
}

impl ErrorKind {
    /// Map a platform error code to its domain kind.
    ///
    /// Total: never fails, never drops a code. Matching ignores case and
    /// surrounding whitespace; the `Unknown` payload keeps the code as given.
    pub fn from_platform_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "no-speech" => Self::NoSpeechDetected,
            "audio-capture" => Self::MicrophoneUnavailable,
            "not-allowed" | "service-not-allowed" => Self::PermissionDenied,
            "network" => Self::NetworkFailure,
            "aborted" => Self::SessionAborted,
            "language-not-supported" => Self::LocaleUnsupported,
            _ => Self::Unknown(code.to_string()),
        }
    }

    /// Stable label used in logs and by host UIs to look up a message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoSpeechDetected => "no_speech_detected",
            Self::MicrophoneUnavailable => "microphone_unavailable",
            Self::PermissionDenied => "permission_denied",
            Self::NetworkFailure => "network_failure",
            Self::SessionAborted => "session_aborted",
            Self::LocaleUnsupported => "locale_unsupported",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown({code})"),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_their_kind() {
        let table = [
            ("no-speech", ErrorKind::NoSpeechDetected),
            ("audio-capture", ErrorKind::MicrophoneUnavailable),
            ("not-allowed", ErrorKind::PermissionDenied),
            ("service-not-allowed", ErrorKind::PermissionDenied),
            ("network", ErrorKind::NetworkFailure),
            ("aborted", ErrorKind::SessionAborted),
            ("language-not-supported", ErrorKind::LocaleUnsupported),
        ];
        for (code, kind) in table {
            assert_eq!(ErrorKind::from_platform_code(code), kind, "code {code}");
        }
    }

    #[test]
    fn unmapped_code_is_unknown_with_original_code() {
        assert_eq!(
            ErrorKind::from_platform_code("bad-grammar"),
            ErrorKind::Unknown("bad-grammar".into())
        );
        assert_eq!(
            ErrorKind::from_platform_code(""),
            ErrorKind::Unknown(String::new())
        );
    }

    #[test]
    fn code_matching_ignores_case_and_padding() {
        assert_eq!(
            ErrorKind::from_platform_code("  Not-Allowed "),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn display_uses_labels() {
        assert_eq!(ErrorKind::NetworkFailure.to_string(), "network_failure");
        assert_eq!(ErrorKind::Unknown("x-42".into()).to_string(), "unknown(x-42)");
    }

    #[test]
    fn error_kind_json_shape() {
        let json = serde_json::to_value(ErrorKind::PermissionDenied).unwrap();
        assert_eq!(json["kind"], "permission_denied");

        let json = serde_json::to_value(ErrorKind::Unknown("weird".into())).unwrap();
        assert_eq!(json["kind"], "unknown");
        assert_eq!(json["code"], "weird");
    }

    #[test]
    fn glas_error_display() {
        let err = GlasError::ConfigInvalid {
            reason: "locale must be ro-RO".into(),
        };
        assert_eq!(err.to_string(), "invalid config: locale must be ro-RO");

        let err = GlasError::TemplateInvalid {
            pattern: "caută {".into(),
            reason: "unclosed capture".into(),
        };
        assert_eq!(err.to_string(), "invalid template `caută {`: unclosed capture");
    }

    #[test]
    fn glas_error_from_io_and_json() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GlasError = io_err.into();
        assert!(matches!(err, GlasError::Io(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("{{bad}}").unwrap_err();
        let err: GlasError = json_err.into();
        assert!(matches!(err, GlasError::Json(_)));
    }
}
