//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. An explicit path (e.g. the CLI's `--config`).
//! 2. `GLAS_CONFIG` environment variable.
//! 3. `~/.glas/config.json`
//! 4. If none found, the default configuration.
//!
//! JSON keys are normalized from camelCase to snake_case before
//! deserialization. Entries under a `params` object are user data
//! (parameter names of resolved commands) and are left untouched.

use std::path::{Path, PathBuf};

use glas_types::{Config, GlasError, Result};
use serde_json::Value;

use crate::env::Environment;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "GLAS_CONFIG";

/// Discover the config file path.
///
/// Returns `None` if neither the environment variable is set nor the
/// home-directory file exists.
pub fn discover_config_path(env: &dyn Environment, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(env_path) = env.get_var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(env_path));
    }

    let candidate = home_dir?.join(".glas").join("config.json");
    candidate.exists().then_some(candidate)
}

/// Load and validate the configuration.
///
/// A discovered path that does not exist falls back to defaults, matching
/// how a fresh install behaves; an explicit path that does not exist is
/// an error.
pub async fn load_config(env: &dyn Environment, explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(GlasError::ConfigInvalid {
                    reason: format!("config file {} does not exist", path.display()),
                });
            }
            path.to_path_buf()
        }
        None => match discover_config_path(env, dirs::home_dir()) {
            Some(path) if path.exists() => path,
            Some(path) => {
                tracing::warn!(
                    path = %path.display(),
                    "config path does not exist, using defaults"
                );
                return Ok(Config::default());
            }
            None => {
                tracing::info!("no config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    tracing::debug!(path = %path.display(), "loading config file");
    let contents = tokio::fs::read_to_string(&path).await?;
    parse_config(&contents)
}

/// Parse, normalize and validate config JSON.
pub fn parse_config(contents: &str) -> Result<Config> {
    let value: Value = serde_json::from_str(contents)?;
    let config: Config = serde_json::from_value(normalize_keys(value))?;
    config.validate()?;
    Ok(config)
}

/// Convert camelCase JSON keys to snake_case recursively.
///
/// The contents of any `params` object are kept verbatim.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut new_map = serde_json::Map::new();
            for (key, val) in map {
                let snake_key = camel_to_snake(&key);
                let val = if snake_key == "params" {
                    val
                } else {
                    normalize_keys(val)
                };
                new_map.insert(snake_key, val);
            }
            Value::Object(new_map)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Convert a single camelCase string to snake_case.
///
/// A run of uppercase letters like `"HTML"` is kept together, with an
/// underscore inserted only before the last uppercase letter if it is
/// followed by a lowercase letter.
///
/// # Examples
/// ```
/// # use glas_platform::config_loader::camel_to_snake;
/// assert_eq!(camel_to_snake("minConfidence"), "min_confidence");
/// assert_eq!(camel_to_snake("already_snake"), "already_snake");
/// assert_eq!(camel_to_snake("HTMLParser"), "html_parser");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();

            if prev.is_lowercase()
                || (prev.is_uppercase() && next.is_some_and(|c| c.is_lowercase()))
            {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }
    result
}
