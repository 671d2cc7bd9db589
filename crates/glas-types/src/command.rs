//! Action types and resolved commands.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What a resolved command asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Move to an application route (`path` param).
    Navigate,
    /// Open the creation flow for a resource (`resource`, `path` params).
    Create,
    /// Run a search (`query` param).
    Search,
    /// Generate a report (`reportType` param).
    Report,
    /// Run a calculation (`service`, optional `amount`/`currency`).
    Calculate,
    /// A dictated amount (`value`, optional `currency`).
    Amount,
    /// Show the list of available voice commands.
    Help,
    /// Control the voice session itself (`command` param).
    Control,
}

impl ActionType {
    /// The wire name of this action (`"navigate"`, `"search"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Create => "create",
            Self::Search => "search",
            Self::Report => "report",
            Self::Calculate => "calculate",
            Self::Amount => "amount",
            Self::Help => "help",
            Self::Control => "control",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a successful grammar match.
///
/// Built once by the grammar and handed to the dispatcher by value;
/// there is no mutating API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCommand {
    #[serde(rename = "actionType")]
    action: ActionType,
    params: BTreeMap<String, String>,
    #[serde(rename = "patternId")]
    pattern_id: String,
}

impl ResolvedCommand {
    /// Create a resolved command for the pattern `pattern_id`.
    pub fn new(
        pattern_id: impl Into<String>,
        action: ActionType,
        params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            action,
            params,
            pattern_id: pattern_id.into(),
        }
    }

    pub fn action(&self) -> ActionType {
        self.action
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Look up a single parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Id of the grammar pattern that produced this command.
    pub fn pattern_id(&self) -> &str {
        &self.pattern_id
    }
}
