//! Configuration schema.
//!
//! Deserialized from the JSON file found by the platform config loader.
//! Every field has a default, so an empty object is a valid config.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::binding::ParamBinding;
use crate::command::ActionType;
use crate::error::{GlasError, Result};

/// The single language tag this deployment recognizes.
pub const SUPPORTED_LOCALE: &str = "ro-RO";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Speech session settings.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Command grammar settings.
    #[serde(default)]
    pub grammar: GrammarConfig,
}

impl Config {
    /// Check the semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.speech.locale != SUPPORTED_LOCALE {
            return Err(GlasError::ConfigInvalid {
                reason: format!(
                    "locale `{}` is not supported (only {SUPPORTED_LOCALE})",
                    self.speech.locale
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.speech.min_confidence) {
            return Err(GlasError::ConfigInvalid {
                reason: format!(
                    "min_confidence must be within 0.0..=1.0, got {}",
                    self.speech.min_confidence
                ),
            });
        }

        let mut seen = HashSet::new();
        for cmd in &self.grammar.custom {
            if cmd.id.trim().is_empty() {
                return Err(GlasError::ConfigInvalid {
                    reason: "custom command with empty id".into(),
                });
            }
            if !seen.insert(cmd.id.as_str()) {
                return Err(GlasError::ConfigInvalid {
                    reason: format!("duplicate custom command id `{}`", cmd.id),
                });
            }
            if cmd.templates.is_empty() {
                return Err(GlasError::ConfigInvalid {
                    reason: format!("custom command `{}` has no templates", cmd.id),
                });
            }
        }
        Ok(())
    }
}

/// Speech capture session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Language tag the engine is configured for.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Keep listening after a final result until stopped.
    #[serde(default = "default_true")]
    pub continuous: bool,

    /// Ask the engine for interim (provisional) results.
    #[serde(default = "default_true")]
    pub interim_results: bool,

    /// Final chunks below this confidence are transcribed but not matched.
    #[serde(default)]
    pub min_confidence: f32,
}

fn default_locale() -> String {
    SUPPORTED_LOCALE.into()
}

fn default_true() -> bool {
    true
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            continuous: true,
            interim_results: true,
            min_confidence: 0.0,
        }
    }
}

/// Command grammar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Include the built-in command set.
    #[serde(default = "default_true")]
    pub builtins: bool,

    /// Maximum edit distance tolerated by static phrase patterns.
    #[serde(default = "default_fuzzy_distance")]
    pub fuzzy_distance: usize,

    /// Politeness fillers stripped from utterances before matching.
    #[serde(default = "default_fillers")]
    pub fillers: Vec<String>,

    /// Built-in pattern ids to leave out.
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Extra patterns, evaluated after the built-ins.
    #[serde(default)]
    pub custom: Vec<CustomCommand>,
}

fn default_fuzzy_distance() -> usize {
    1
}

fn default_fillers() -> Vec<String> {
    ["te rog", "vă rog", "poți să", "vreau să", "aș vrea să"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            fuzzy_distance: default_fuzzy_distance(),
            fillers: default_fillers(),
            disabled: Vec::new(),
            custom: Vec::new(),
        }
    }
}

/// A user-declared command pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomCommand {
    /// Unique pattern id.
    pub id: String,

    /// Token templates, e.g. `"deschide clientul {name}"`.
    pub templates: Vec<String>,

    /// Action the command resolves to.
    pub action: ActionType,

    /// Parameters attached on every match.
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Capture-to-parameter bindings.
    #[serde(default)]
    pub bindings: Vec<ParamBinding>,

    /// Human-readable description (for help listing).
    #[serde(default)]
    pub description: String,
}
