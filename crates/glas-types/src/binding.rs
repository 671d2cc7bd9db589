//! Capture-to-parameter bindings.
//!
//! A capturing pattern declares, per capture, which semantic parameter
//! receives the captured text and how the raw text is normalized first.

use serde::{Deserialize, Serialize};

/// How captured text is rewritten before it lands in a command's params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueNormalizer {
    /// Keep the captured text as-is.
    #[default]
    Verbatim,
    /// Decimal-comma numeral to decimal-point numeral (`"25,50"` -> `"25.50"`).
    DecimalPoint,
    /// Spoken currency word to ISO code (`"lei"` -> `"RON"`).
    CurrencyCode,
}

impl ValueNormalizer {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Self::Verbatim => raw.to_string(),
            Self::DecimalPoint => raw.replace(',', "."),
            Self::CurrencyCode => currency_code(raw)
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_uppercase()),
        }
    }
}

/// ISO code for a spoken (diacritic-folded, lowercase) currency word.
pub fn currency_code(word: &str) -> Option<&'static str> {
    match word {
        "lei" | "leu" | "ron" => Some("RON"),
        "euro" | "eur" => Some("EUR"),
        "dolari" | "dolar" | "usd" => Some("USD"),
        _ => None,
    }
}

/// Maps one named capture to one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamBinding {
    /// Capture name as written in the template (`{query}` -> `"query"`).
    pub capture: String,
    /// Parameter key in the resolved command.
    pub param: String,
    #[serde(default)]
    pub normalize: ValueNormalizer,
}

impl ParamBinding {
    pub fn new(capture: &str, param: &str, normalize: ValueNormalizer) -> Self {
        Self {
            capture: capture.to_string(),
            param: param.to_string(),
            normalize,
        }
    }

    /// Bind a capture to a parameter of the same name, unchanged.
    pub fn verbatim(name: &str) -> Self {
        Self::new(name, name, ValueNormalizer::Verbatim)
    }
}
